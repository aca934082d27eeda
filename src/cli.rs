//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands. It is also
//! compiled by `build.rs` to render the manual page, so it depends on nothing
//! but `clap` and the standard library.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Render the storylines recorded in saved suite reports.
#[derive(Debug, Parser)]
#[command(name = "storyline", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Indented plain text.
    #[default]
    Text,
    /// Markdown headings with one bullet per step.
    Markdown,
    /// The filtered reports as pretty-printed JSON.
    Json,
}

/// Arguments accepted by the `render` command.
#[derive(Debug, Args, PartialEq, Eq, Clone)]
pub struct RenderArgs {
    /// Suite report files to read.
    #[arg(value_name = "REPORT", required = true)]
    pub reports: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only include tests that failed.
    #[arg(long)]
    pub failed_only: bool,

    /// Write the output to this file; `-` or omitted writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Available top-level commands.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone)]
pub enum Commands {
    /// Print the story of every test in the given reports.
    Render(RenderArgs),

    /// Print pass and fail counts; exits non-zero when any test failed.
    Summary {
        /// Suite report files to read.
        #[arg(value_name = "REPORT", required = true)]
        reports: Vec<PathBuf>,
    },
}
