//! grabicon CLI - find every favicon of a webpage
//!
//! Parses arguments, builds a [`FaviconGrabber`] from the layered
//! configuration (file, then environment and flags), runs one discovery and
//! renders the report.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grabicon::{FaviconGrabber, GrabConfig};
use std::io::{self, Write};
use tracing::debug;

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
pub mod save;

use crate::cli::Cli;
use crate::error::{CliError, ErrorCategory};
use crate::logging::initialize_logging;

/// Execute the grabicon CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the page cannot be
/// resolved, or icons cannot be saved or printed.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output.resolve();
    initialize_logging(&cli, format)?;

    let config = resolve_config(&cli).context("Failed to load configuration")?;
    debug!(?config, %format, "starting");

    if let Some(dir) = &cli.output_dir {
        if dir.is_file() {
            return Err(CliError::usage(anyhow!(
                "Output directory '{}' is an existing file",
                dir.display()
            ))
            .into());
        }
    }

    let grabber = FaviconGrabber::new(config)?;
    let report = grabber.grab_report(cli.url.as_deref()).await?;

    let saved = match &cli.output_dir {
        Some(dir) => save::save_icons(&report.icons, dir)
            .map_err(|e| CliError::new(ErrorCategory::Internal, e))?,
        None => Vec::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(&report, &saved, format, cli.show_skipped, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Configuration for this invocation: the `--config` file (or the default
/// location), with `--timeout` and `--concurrency` layered on top.
///
/// # Errors
///
/// Returns a configuration error for unreadable files or invalid values.
pub fn resolve_config(cli: &Cli) -> grabicon::Result<GrabConfig> {
    let mut config = match &cli.config {
        Some(path) => GrabConfig::load_from(path)?,
        None => GrabConfig::load()?,
    };

    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }

    config.validate()?;
    Ok(config)
}
