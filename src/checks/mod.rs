//! Release page checks
//!
//! Every check is a plain function from fetched data to a [`CheckOutcome`].
//! Nothing here panics or returns early on a mismatch; the runner collects one
//! [`CheckResult`] per check into a flat list for reporting.

pub mod artifact;
pub mod download;
pub mod pre_release;

use reqwest::StatusCode;
use std::fmt;

pub use artifact::{check_artifact, md5_hex, verify_artifact};
pub use download::{check_changelog_link, check_files_section, check_title};
pub use pre_release::check_reference_to_pre_release;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The assertion held
    Passed,

    /// The assertion did not hold; the message describes the mismatch
    Failed(String),

    /// The check could not be evaluated (network failure, unreadable row)
    Errored(String),
}

impl CheckOutcome {
    /// Passes when `expected == actual`, otherwise fails with both values
    pub fn expect_eq<T: PartialEq + fmt::Debug>(what: &str, expected: T, actual: T) -> Self {
        if expected == actual {
            Self::Passed
        } else {
            Self::Failed(format!(
                "{}: expected {:?}, found {:?}",
                what, expected, actual
            ))
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored(_))
    }

    /// Short status word used in the verbose listing
    pub fn status_word(&self) -> &'static str {
        match self {
            Self::Passed => "ok",
            Self::Failed(_) => "FAIL",
            Self::Errored(_) => "ERROR",
        }
    }

    /// Failure or error message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed(message) | Self::Errored(message) => Some(message),
        }
    }
}

/// The page a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckGroup {
    /// The pre-release listing page
    PreReleasePage,
    /// The per-version download page and its artifacts
    DownloadPage,
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreReleasePage => write!(f, "PreReleasePage"),
            Self::DownloadPage => write!(f, "DownloadPage"),
        }
    }
}

/// Named outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub group: CheckGroup,
    pub name: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn new(group: CheckGroup, name: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            group,
            name: name.into(),
            outcome,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.group)
    }
}

/// Status must be exactly 200
pub fn check_status(status: StatusCode) -> CheckOutcome {
    CheckOutcome::expect_eq("status code", 200, status.as_u16())
}
