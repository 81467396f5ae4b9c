//! Release-Check main entry point
//!
//! This is the command-line interface for the release page verifier.

use anyhow::Context;
use clap::Parser;
use release_check::config::{load_config_or_default, validate};
use release_check::output::{generate_markdown_report, print_report};
use release_check::verifier::verify;
use release_check::VersionSpec;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Release-Check: verifies a published CPython release
///
/// Fetches the download page of a release, checks its title, changelog link
/// and files table, then downloads every listed artifact and compares its
/// size and MD5 checksum with what the page advertises.
#[derive(Parser, Debug)]
#[command(name = "release-check")]
#[command(version)]
#[command(about = "Verifies CPython release pages and artifacts", long_about = None)]
struct Cli {
    /// Version of Python, e.g. 3.8.0a3
    #[arg(value_name = "VERSION")]
    version: String,

    /// Test if the pre-release page has the right version
    #[arg(long)]
    pre_release: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the site root (e.g. a staging deployment)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Also write the report as Markdown to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("release_check=info,warn"),
            1 => EnvFilter::new("release_check=debug,info"),
            2 => EnvFilter::new("release_check=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the verification; `Ok(true)` when every check passed
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config =
        load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Default configuration is invalid".to_string(),
        })?;

    if let Some(base_url) = cli.base_url {
        tracing::debug!("Overriding base URL with {}", base_url);
        config.site.base_url = base_url;
        validate(&config).context("Invalid --base-url")?;
    }

    let version = VersionSpec::parse(&cli.version);
    tracing::info!(
        "Verifying Python {} (compact {}, changelog anchor {}) against {}",
        version,
        version.compact,
        version.changelog_fragment(),
        config.site.base_url
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = runtime
        .block_on(verify(config, version, cli.pre_release))
        .context("Failed to set up verifier")?;

    print_report(&report);

    if let Some(path) = &cli.summary {
        generate_markdown_report(&report, path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    Ok(report.is_success())
}
