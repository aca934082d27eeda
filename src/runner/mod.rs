//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads saved suite reports and writes the requested rendering.

mod error;
pub mod render;

pub use error::RunnerError;

use crate::cli::{Cli, Commands, RenderArgs};
use crate::report::SuiteReport;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Execute the parsed [`Cli`] command.
///
/// # Errors
///
/// Returns an error if a report cannot be loaded, the output cannot be
/// written, or `summary` finds failed tests.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render(args) => handle_render(args),
        Commands::Summary { reports } => handle_summary(reports),
    }
}

/// Load every report in `paths`, in order.
///
/// # Errors
///
/// Returns an error naming the first report that fails to load.
pub fn load_reports(paths: &[PathBuf]) -> Result<Vec<SuiteReport>> {
    paths
        .iter()
        .map(|path| {
            debug!("loading report {}", path.display());
            SuiteReport::read_json(path)
                .with_context(|| format!("loading report at {}", path.display()))
        })
        .collect()
}

fn handle_render(args: &RenderArgs) -> Result<()> {
    let mut reports = load_reports(&args.reports)?;
    if args.failed_only {
        reports = render::only_failed(reports);
    }
    let text = render::render(&reports, args.format)?;
    match args.output.as_deref() {
        Some(path) if !is_stdout_path(path) => write_and_log(path, &text),
        _ => write_stdout(&text),
    }
}

fn handle_summary(paths: &[PathBuf]) -> Result<()> {
    let reports = load_reports(paths)?;
    write_stdout(&render::render_summary(&reports))?;
    let total = reports.iter().map(|suite| suite.tests.len()).sum();
    let failed = reports.iter().map(SuiteReport::failures).sum();
    if failed > 0 {
        return Err(RunnerError::FailedTests { failed, total }.into());
    }
    Ok(())
}

/// Returns `true` when `path` is the conventional `-` stdout marker.
#[must_use]
pub fn is_stdout_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("writing to stdout")
}

/// Write `content` to `path` and log the file's location.
fn write_and_log(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote rendered stories to {}", path.display());
    Ok(())
}
