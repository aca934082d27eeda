//! Error types for the runner module.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised during command execution.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// At least one test in the summarised reports failed.
    #[error("{failed} of {total} tests failed")]
    #[diagnostic(
        code(storyline::runner::failed_tests),
        help("run `storyline render --failed-only` to see their stories")
    )]
    FailedTests {
        /// Number of failed tests.
        failed: usize,
        /// Number of tests across all reports.
        total: usize,
    },
}
