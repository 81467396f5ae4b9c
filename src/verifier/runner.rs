//! Verification runner - builds and executes the check groups
//!
//! This module contains the single linear pass over the release pages:
//! - Fetching the pre-release page (only when requested)
//! - Fetching the download page once and running its structural checks
//! - Downloading and verifying every artifact in the files table
//! - Collecting every outcome into a [`Report`]

use crate::checks::{
    check_artifact, check_changelog_link, check_files_section, check_reference_to_pre_release,
    check_status, check_title, CheckGroup, CheckOutcome, CheckResult,
};
use crate::config::Config;
use crate::output::Report;
use crate::verifier::parser::{parse_download_page, parse_pre_release_page, FilesSection};
use crate::verifier::{build_http_client, fetch};
use crate::version::VersionSpec;
use crate::ReleaseCheckError;
use reqwest::Client;
use url::Url;

/// Path of the pre-release listing page relative to the site root
pub const PRE_RELEASE_PATH: &str = "/download/pre-releases/";

/// Check names of the pre-release page group, in execution order
pub const PRE_RELEASE_CHECKS: [&str; 2] = ["has_status_200", "has_reference_to_pre_release"];

/// Structural check names of the download page group, in execution order
pub const DOWNLOAD_CHECKS: [&str; 4] = [
    "has_status_200",
    "has_right_title",
    "has_changelog_link",
    "files_section",
];

/// Runs every check for one release version
pub struct Verifier {
    config: Config,
    version: VersionSpec,
    client: Client,
    base_url: Url,
}

impl Verifier {
    /// Creates a new verifier instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `version` - The release being checked
    ///
    /// # Returns
    ///
    /// * `Ok(Verifier)` - Ready to run
    /// * `Err(ReleaseCheckError)` - The base URL or the HTTP client could not be set up
    pub fn new(config: Config, version: VersionSpec) -> Result<Self, ReleaseCheckError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config.user_agent, &config.http)?;

        Ok(Self {
            config,
            version,
            client,
            base_url,
        })
    }

    /// The version under test
    pub fn version(&self) -> &VersionSpec {
        &self.version
    }

    /// URL of the pre-release listing page
    pub fn pre_release_url(&self) -> Result<Url, ReleaseCheckError> {
        Ok(self.base_url.join(PRE_RELEASE_PATH)?)
    }

    /// URL of the version's download page
    pub fn download_url(&self) -> Result<Url, ReleaseCheckError> {
        Ok(self.base_url.join(&self.version.download_path())?)
    }

    /// Runs all checks in order and returns the collected report
    ///
    /// Pre-release checks run first and only when `include_pre_release` is set.
    pub async fn run(&self, include_pre_release: bool) -> Report {
        let mut report = Report::new(&self.version.raw);

        if include_pre_release {
            tracing::info!("Checking pre-release page for {}", self.version);
            report.extend(self.check_pre_release_page().await);
        } else {
            tracing::debug!("Skipping pre-release page checks");
        }

        tracing::info!("Checking download page for {}", self.version);
        report.extend(self.check_download_page().await);

        report.finish();
        report
    }

    /// Checks the pre-release listing page
    pub async fn check_pre_release_page(&self) -> Vec<CheckResult> {
        let group = CheckGroup::PreReleasePage;

        let resource = match self.pre_release_url() {
            Ok(url) => fetch(&self.client, url.as_str()).await,
            Err(e) => Err(e),
        };

        let resource = match resource {
            Ok(resource) => resource,
            Err(e) => return errored_group(group, &PRE_RELEASE_CHECKS, &e),
        };

        let page = parse_pre_release_page(&resource.text());

        vec![
            CheckResult::new(group, PRE_RELEASE_CHECKS[0], check_status(resource.status)),
            CheckResult::new(
                group,
                PRE_RELEASE_CHECKS[1],
                check_reference_to_pre_release(&page, &self.version),
            ),
        ]
    }

    /// Checks the download page and every artifact it lists
    pub async fn check_download_page(&self) -> Vec<CheckResult> {
        let group = CheckGroup::DownloadPage;

        let url = match self.download_url() {
            Ok(url) => url,
            Err(e) => return errored_group(group, &DOWNLOAD_CHECKS, &e),
        };

        let resource = match fetch(&self.client, url.as_str()).await {
            Ok(resource) => resource,
            Err(e) => return errored_group(group, &DOWNLOAD_CHECKS, &e),
        };

        // Relative links resolve against where the page was actually served
        // from, which differs from `url` after a redirect.
        let page_url = Url::parse(&resource.url).unwrap_or(url);
        let page = parse_download_page(&resource.text(), &page_url);

        let mut results = vec![
            CheckResult::new(group, DOWNLOAD_CHECKS[0], check_status(resource.status)),
            CheckResult::new(group, DOWNLOAD_CHECKS[1], check_title(&page, &self.version)),
            CheckResult::new(
                group,
                DOWNLOAD_CHECKS[2],
                check_changelog_link(&page, &self.version, &self.config.site.docs_host),
            ),
            CheckResult::new(group, DOWNLOAD_CHECKS[3], check_files_section(&page)),
        ];

        if let FilesSection::Table(rows) = &page.files {
            tracing::info!("Verifying {} artifacts", rows.len());
            for row in rows {
                let result = match row {
                    Ok(row) => check_artifact(&self.client, row).await,
                    Err(e) => CheckResult::new(
                        group,
                        format!("files_table_row {}", row_index(e)),
                        CheckOutcome::Errored(e.to_string()),
                    ),
                };
                results.push(result);
            }
        }

        results
    }
}

fn row_index(error: &ReleaseCheckError) -> String {
    match error {
        ReleaseCheckError::MalformedRow { index, .. } => index.to_string(),
        _ => "?".to_string(),
    }
}

/// Marks every named check of a group as errored by the same cause
fn errored_group(
    group: CheckGroup,
    names: &[&str],
    error: &ReleaseCheckError,
) -> Vec<CheckResult> {
    tracing::error!("{} could not be fetched: {}", group, error);

    names
        .iter()
        .map(|name| CheckResult::new(group, *name, CheckOutcome::Errored(error.to_string())))
        .collect()
}
