//! Checks for the pre-release listing page

use crate::checks::CheckOutcome;
use crate::verifier::PreReleasePage;
use crate::version::VersionSpec;

/// One of the listed external references must link to the version's download page
pub fn check_reference_to_pre_release(
    page: &PreReleasePage,
    version: &VersionSpec,
) -> CheckOutcome {
    let download_path = version.download_path();

    if page.links.iter().any(|href| *href == download_path) {
        CheckOutcome::Passed
    } else {
        CheckOutcome::Failed(format!(
            "There is no link to the pre-release version {} (looked for {} among {} links)",
            version,
            download_path,
            page.links.len()
        ))
    }
}
