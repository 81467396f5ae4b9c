//! Structural checks for the per-version download page

use crate::checks::CheckOutcome;
use crate::verifier::{DownloadPage, FilesSection};
use crate::version::VersionSpec;
use url::Url;

/// `h1.page-title` must read exactly `Python {version}`
pub fn check_title(page: &DownloadPage, version: &VersionSpec) -> CheckOutcome {
    match &page.title {
        None => CheckOutcome::Failed("no h1.page-title element on the page".to_string()),
        Some(title) => {
            CheckOutcome::expect_eq("page title", version.page_title().as_str(), title.as_str())
        }
    }
}

/// The "Full Changelog" link must point at the version's changelog anchor
///
/// Scheme, host, path and fragment are compared one at a time so the failure
/// names the first component that differs.
pub fn check_changelog_link(
    page: &DownloadPage,
    version: &VersionSpec,
    docs_host: &str,
) -> CheckOutcome {
    let Some(link) = &page.changelog else {
        return CheckOutcome::Failed("no \"Full Changelog\" text on the page".to_string());
    };

    let Some(href) = &link.href else {
        return CheckOutcome::Failed("\"Full Changelog\" is not inside a link".to_string());
    };

    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => match page.url.join(href) {
            Ok(url) => url,
            Err(e) => return invalid_href(href, e),
        },
        Err(e) => return invalid_href(href, e),
    };

    // The parsed URL lowercases the host, drops default ports and resolves dot
    // segments; authority and path are compared as written in the href.
    let (authority, path) = match literal_authority_and_path(href) {
        Some((authority, path)) => (authority.to_string(), path.to_string()),
        None => (
            url.host_str().unwrap_or_default().to_string(),
            url.path().to_string(),
        ),
    };

    let checks = [
        CheckOutcome::expect_eq("changelog scheme", "https", url.scheme()),
        CheckOutcome::expect_eq("changelog host", docs_host, authority.as_str()),
        CheckOutcome::expect_eq(
            "changelog path",
            version.changelog_path().as_str(),
            path.as_str(),
        ),
        CheckOutcome::expect_eq(
            "changelog fragment",
            Some(version.changelog_fragment().as_str()),
            url.fragment(),
        ),
    ];

    checks
        .into_iter()
        .find(|outcome| !outcome.is_passed())
        .unwrap_or(CheckOutcome::Passed)
}

fn invalid_href(href: &str, error: url::ParseError) -> CheckOutcome {
    CheckOutcome::Failed(format!("invalid changelog href '{}': {}", href, error))
}

/// Splits an absolute href into its authority (userinfo, host and port) and
/// path, exactly as written; `None` for hrefs without `://`
fn literal_authority_and_path(href: &str) -> Option<(&str, &str)> {
    let rest = &href[href.find("://")? + 3..];
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);

    match rest.find('/') {
        Some(idx) => Some((&rest[..idx], &rest[idx..])),
        None => Some((rest, "")),
    }
}

/// The "Files" section must hold a table with at least one body row
pub fn check_files_section(page: &DownloadPage) -> CheckOutcome {
    match &page.files {
        FilesSection::MissingHeading => {
            CheckOutcome::Failed("no \"Files\" section on the page".to_string())
        }
        FilesSection::MissingTable => {
            CheckOutcome::Failed("\"Files\" section has no table".to_string())
        }
        FilesSection::Table(rows) if rows.is_empty() => {
            CheckOutcome::Failed("files table has no rows".to_string())
        }
        FilesSection::Table(_) => CheckOutcome::Passed,
    }
}
