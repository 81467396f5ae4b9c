//! Artifact integrity checks
//!
//! Each files-table row is downloaded in full and compared against the size
//! and MD5 checksum the page advertises for it.

use crate::checks::{check_status, CheckGroup, CheckOutcome, CheckResult};
use crate::verifier::{fetch, FetchedResource, FileRow};
use md5::{Digest, Md5};
use reqwest::Client;

/// Lowercase hex MD5 digest of `bytes`
pub fn md5_hex(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Compares a downloaded artifact against its row
///
/// Assertions run in order (status, `content-length`, MD5) and the first one
/// that does not hold decides the outcome.
pub fn verify_artifact(row: &FileRow, resource: &FetchedResource) -> CheckOutcome {
    let status = check_status(resource.status);
    if !status.is_passed() {
        return status;
    }

    // Without the header the size cannot be compared at all.
    let Some(content_length) = resource.content_length() else {
        return CheckOutcome::Errored(format!(
            "no content-length header for {} (declared size {})",
            resource.url, row.size
        ));
    };

    let size = CheckOutcome::expect_eq("content-length", row.size, content_length);
    if !size.is_passed() {
        return size;
    }

    // Case-sensitive: the page is expected to publish lowercase hex.
    let digest = md5_hex(&resource.body);
    CheckOutcome::expect_eq("md5", row.md5.as_str(), digest.as_str())
}

/// Downloads one row's artifact and verifies it
///
/// A transport failure becomes an errored result for this row only.
pub async fn check_artifact(client: &Client, row: &FileRow) -> CheckResult {
    tracing::info!("Downloading {} at {}", row.name, row.url);

    let outcome = match fetch(client, &row.url).await {
        Ok(resource) => verify_artifact(row, &resource),
        Err(e) => CheckOutcome::Errored(e.to_string()),
    };

    match &outcome {
        CheckOutcome::Passed => tracing::debug!("{} verified", row.name),
        CheckOutcome::Failed(message) | CheckOutcome::Errored(message) => {
            tracing::warn!("{}: {}", row.name, message)
        }
    }

    CheckResult::new(CheckGroup::DownloadPage, row.label(), outcome)
}
