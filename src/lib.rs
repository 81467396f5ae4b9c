//! Release-Check: verifies published CPython release pages
//!
//! This crate fetches the pre-release listing and the per-version download page
//! of a release, checks their structure, and verifies that every artifact in the
//! files table matches its advertised size and MD5 checksum.

pub mod checks;
pub mod config;
pub mod output;
pub mod verifier;
pub mod version;

use thiserror::Error;

/// Main error type for Release-Check operations
#[derive(Debug, Error)]
pub enum ReleaseCheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Malformed files table row {index}: {message}")]
    MalformedRow { index: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Release-Check operations
pub type Result<T> = std::result::Result<T, ReleaseCheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checks::{CheckOutcome, CheckResult};
pub use config::Config;
pub use output::Report;
pub use verifier::Verifier;
pub use version::VersionSpec;
