//! Output module for verification reports
//!
//! This module handles:
//! - Collecting check results in execution order
//! - Printing the verbose pass/fail/error listing
//! - Writing an optional Markdown report

mod markdown;
mod report;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use report::{print_report, Report};
