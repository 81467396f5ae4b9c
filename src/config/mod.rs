//! Configuration module for Release-Check
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file the python.org defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use release_check::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("release-check.toml")).unwrap();
//! println!("Changelog must live on: {}", config.site.docs_host);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
