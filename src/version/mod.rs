//! Version normalization
//!
//! Derives every identifier the release pages are keyed on from the version
//! string given on the command line.

use std::fmt;

/// Long-form names of the pre-release markers, keyed by their short form
const MARKERS: [(char, &str); 2] = [('a', "alpha"), ('b', "beta")];

/// Tag used in the changelog anchor when no pre-release marker is present
const FINAL_TAG: &str = "final";

/// Identifiers derived from a release version string
///
/// Built once from user input and never mutated. No validation is performed:
/// a malformed string produces whatever the split yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    /// The version exactly as given (e.g. `3.8.0a3`)
    pub raw: String,

    /// The version with every period removed (e.g. `380a3`)
    pub compact: String,

    /// The first two period-delimited segments (e.g. `["3", "8"]`)
    pub major: Vec<String>,

    /// Canonical label used in changelog anchors (e.g. `380-alpha3`, `380-final`)
    pub expected: String,

    /// True when an alpha or beta marker is present
    pub pre_release: bool,
}

impl VersionSpec {
    /// Parses a version string into its derived identifiers
    ///
    /// # Example
    ///
    /// ```
    /// use release_check::version::VersionSpec;
    ///
    /// let spec = VersionSpec::parse("3.8.0a3");
    /// assert_eq!(spec.compact, "380a3");
    /// assert_eq!(spec.major_version(), "3.8");
    /// assert_eq!(spec.expected, "380-alpha3");
    /// assert!(spec.pre_release);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let compact = raw.replace('.', "");

        let major: Vec<String> = raw.split('.').take(2).map(str::to_string).collect();
        if major.len() < 2 {
            tracing::warn!(
                "Version '{}' has fewer than two segments, derived paths will be wrong",
                raw
            );
        }

        // Split once at the first marker; everything after it is the
        // pre-release serial.
        let marker = raw
            .char_indices()
            .find_map(|(idx, c)| {
                MARKERS
                    .iter()
                    .find(|(short, _)| *short == c)
                    .map(|(_, long)| (idx, *long))
            });

        let (release, tag) = match marker {
            Some((idx, long)) => (&raw[..idx], format!("{}{}", long, &raw[idx + 1..])),
            None => (raw, FINAL_TAG.to_string()),
        };

        let numeric: String = release.split('.').filter(|s| !s.is_empty()).collect();
        let expected = format!("{}-{}", numeric, tag);

        Self {
            raw: raw.to_string(),
            compact,
            major,
            expected,
            pre_release: marker.is_some(),
        }
    }

    /// The major-version pair joined as it appears in documentation paths (`3.8`)
    pub fn major_version(&self) -> String {
        self.major.join(".")
    }

    /// Fragment the changelog link must point at
    pub fn changelog_fragment(&self) -> String {
        format!("python-{}", self.expected)
    }

    /// Path of the download page relative to the site root
    pub fn download_path(&self) -> String {
        format!("/downloads/release/python-{}/", self.compact)
    }

    /// Path of the changelog on the documentation host
    pub fn changelog_path(&self) -> String {
        format!("/{}/whatsnew/changelog.html", self.major_version())
    }

    /// Title the download page is expected to carry
    pub fn page_title(&self) -> String {
        format!("Python {}", self.raw)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
