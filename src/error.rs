//! Error types raised by the step pipeline.
//!
//! Step implementations report their own failures as [`anyhow::Error`] and
//! those pass through untouched. The variants here cover failures of the
//! pipeline itself; callers holding an `anyhow::Error` can recover them with
//! `downcast_ref::<StepError>()`.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, so `#[expect]` cannot be used.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// Failures of step resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StepError {
    /// No namespace on the page object model holds the step.
    #[error("unable to find method for: '{name}' on Page Object Model")]
    #[diagnostic(code(storyline::step_not_found))]
    StepNotFound {
        /// Fully-qualified lookup name, e.g. `When the user clicks p0`.
        name: String,
        /// Namespaces that were searched.
        #[help]
        help: String,
    },
    /// The test run was configured without a page object model.
    #[error("no Page Object Model is configured for step: '{name}'")]
    #[diagnostic(
        code(storyline::missing_page_object_model),
        help("supply a PageObjectModel before calling steps")
    )]
    MissingPageObjectModel {
        /// Fully-qualified lookup name.
        name: String,
    },
}

impl StepError {
    /// Lookup name of the step that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::StepNotFound { name, .. } | Self::MissingPageObjectModel { name } => name,
        }
    }
}
