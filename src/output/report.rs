//! Check report collection and the verbose text listing

use crate::checks::CheckResult;
use chrono::{DateTime, Utc};

const SEPARATOR_HEAVY: &str =
    "======================================================================";
const SEPARATOR_LIGHT: &str =
    "----------------------------------------------------------------------";

/// Ordered outcomes of one verification pass
#[derive(Debug, Clone)]
pub struct Report {
    /// The version string the run was started with
    pub version: String,

    /// When the first check started
    pub started_at: DateTime<Utc>,

    /// When the last check finished
    pub finished_at: Option<DateTime<Utc>>,

    /// Every check result, in execution order
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CheckResult) {
        tracing::debug!("{} ... {}", result, result.outcome.status_word());
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = CheckResult>) {
        for result in results {
            self.push(result);
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn errors(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_errored()).count()
    }

    /// True when every check passed
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_passed())
    }

    /// Seconds between start and finish, if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Results that did not pass
    pub fn problems(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.outcome.is_passed())
    }

    /// Renders the verbose listing: one line per check, then details for
    /// every failure or error, then the summary count
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for result in &self.results {
            out.push_str(&format!("{} ... {}\n", result, result.outcome.status_word()));
        }

        for result in self.problems() {
            out.push_str(&format!("\n{}\n", SEPARATOR_HEAVY));
            out.push_str(&format!("{}: {}\n", result.outcome.status_word(), result));
            out.push_str(&format!("{}\n", SEPARATOR_LIGHT));
            out.push_str(&format!("{}\n", result.outcome.message().unwrap_or_default()));
        }

        out.push_str(&format!("{}\n", SEPARATOR_LIGHT));
        match self.duration_seconds() {
            Some(secs) => {
                out.push_str(&format!("Ran {} checks in {:.3}s\n\n", self.total(), secs));
            }
            None => {
                out.push_str(&format!("Ran {} checks\n\n", self.total()));
            }
        }

        if self.is_success() {
            out.push_str("OK\n");
        } else {
            out.push_str(&format!(
                "FAILED (failures={}, errors={})\n",
                self.failures(),
                self.errors()
            ));
        }

        out
    }
}

/// Prints the verbose listing to stdout
pub fn print_report(report: &Report) {
    print!("{}", report.render_text());
}
