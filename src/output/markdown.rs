//! Markdown report generation
//!
//! This module writes a verification report as a Markdown document, suitable
//! for attaching to a release ticket.

use crate::output::Report;
use crate::ReleaseCheckError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a Markdown report to `output_path`
///
/// # Arguments
///
/// * `report` - The finished report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(ReleaseCheckError)` - Failed to write the file
pub fn generate_markdown_report(
    report: &Report,
    output_path: &Path,
) -> Result<(), ReleaseCheckError> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &Report) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Release Check: Python {}\n\n", report.version));

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = &report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!("- **Duration**: {:.3} seconds\n", duration));
    }
    let status = if report.is_success() { "PASSED" } else { "FAILED" };
    md.push_str(&format!("- **Status**: {}\n\n", status));

    // Counts
    md.push_str("## Summary\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Passed | {} |\n", report.passed()));
    md.push_str(&format!("| Failed | {} |\n", report.failures()));
    md.push_str(&format!("| Errored | {} |\n", report.errors()));
    md.push_str(&format!("| Total | {} |\n\n", report.total()));

    // Every check
    md.push_str("## Checks\n\n");
    md.push_str("| Group | Check | Outcome |\n");
    md.push_str("|-------|-------|---------|\n");
    for result in &report.results {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            result.group,
            escape_cell(&result.name),
            result.outcome.status_word()
        ));
    }
    md.push('\n');

    let problems: Vec<_> = report.problems().collect();
    if !problems.is_empty() {
        md.push_str("## Problems\n\n");
        for result in problems {
            md.push_str(&format!(
                "- **{}** `{}` ({}): {}\n",
                result.outcome.status_word(),
                result.name,
                result.group,
                result.outcome.message().unwrap_or_default()
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps pipes in check names from breaking the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
