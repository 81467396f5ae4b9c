//! Verifier module for release page fetching and checking
//!
//! This module contains the core verification flow, including:
//! - HTTP fetching (single request, no retries)
//! - HTML parsing of the download and pre-release pages
//! - Running the check groups in order

mod fetcher;
mod parser;
mod runner;

pub use fetcher::{build_http_client, fetch, FetchedResource};
pub use parser::{
    parse_download_page, parse_pre_release_page, ChangelogLink, DownloadPage, FileRow,
    FilesSection, PreReleasePage,
};
pub use runner::{Verifier, DOWNLOAD_CHECKS, PRE_RELEASE_CHECKS, PRE_RELEASE_PATH};

use crate::config::Config;
use crate::output::Report;
use crate::version::VersionSpec;
use crate::ReleaseCheckError;

/// Runs a complete verification pass
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Check the pre-release page (when requested)
/// 3. Check the download page and its artifacts
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `version` - The release being checked
/// * `include_pre_release` - Whether to run the pre-release page checks
///
/// # Returns
///
/// * `Ok(Report)` - Every check ran; inspect the report for failures
/// * `Err(ReleaseCheckError)` - The verifier could not be set up
pub async fn verify(
    config: Config,
    version: VersionSpec,
    include_pre_release: bool,
) -> Result<Report, ReleaseCheckError> {
    let verifier = Verifier::new(config, version)?;
    Ok(verifier.run(include_pre_release).await)
}
