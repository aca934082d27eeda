//! Test reports and annotations.
//!
//! Each completed test run produces a [`TestReport`] carrying the structured
//! annotations attached during teardown. Suites gather their test reports
//! into a [`SuiteReport`], which can be saved as JSON and rendered later by
//! the `storyline` binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Annotation type used for flushed storylines.
pub const STORY_ANNOTATION: &str = "story";

/// Structured note attached to a test's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation kind, e.g. `story`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form body.
    pub description: String,
}

impl Annotation {
    /// Annotation holding a flushed storyline.
    #[must_use]
    pub fn story(description: impl Into<String>) -> Self {
        Self {
            kind: STORY_ANNOTATION.to_owned(),
            description: description.into(),
        }
    }

    /// Returns `true` for storyline annotations.
    #[must_use]
    pub fn is_story(&self) -> bool {
        self.kind == STORY_ANNOTATION
    }
}

/// Destination for annotations produced at teardown.
pub trait ReportSink {
    /// Attach `annotation` to the current test.
    fn annotate(&mut self, annotation: Annotation);
}

impl ReportSink for Vec<Annotation> {
    fn annotate(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

/// Final state of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The body completed without error.
    Passed,
    /// The body returned an error or panicked.
    Failed,
}

/// Result of one test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Test title.
    pub title: String,
    /// Outcome once the body finished.
    pub outcome: Outcome,
    /// Failure message when the test failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Annotations attached during the run.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TestReport {
    /// Start a passing report with no annotations.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcome: Outcome::Passed,
            error: None,
            annotations: Vec::new(),
        }
    }

    /// Mark the report failed with `message`.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.outcome = Outcome::Failed;
        self.error = Some(message.into());
    }

    /// Returns `true` if the test passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// Description of the first `story` annotation.
    #[must_use]
    pub fn story(&self) -> Option<&str> {
        self.annotations
            .iter()
            .find(|annotation| annotation.is_story())
            .map(|annotation| annotation.description.as_str())
    }
}

impl ReportSink for TestReport {
    fn annotate(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

/// Tag prefixed to a suite title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteTag {
    /// Tests covering one feature.
    Feature,
    /// Quick sanity checks.
    Smoke,
    /// Tests covering a user flow.
    Flow,
    /// Tests run in continuous integration.
    Ci,
}

impl SuiteTag {
    /// Prefix written before the suite title.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Feature => "@feature",
            Self::Smoke => "@smoke",
            Self::Flow => "@flow",
            Self::Ci => "@ci",
        }
    }

    /// Tagged form of `title`.
    ///
    /// ```
    /// use storyline::SuiteTag;
    ///
    /// assert_eq!(SuiteTag::Smoke.title("checkout"), "@smoke checkout");
    /// ```
    #[must_use]
    pub fn title(self, title: &str) -> String {
        format!("{} {title}", self.prefix())
    }
}

/// Reports of every test in a suite, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Tagged suite title.
    pub title: String,
    /// Tag the suite was declared with.
    pub tag: SuiteTag,
    /// One report per test.
    pub tests: Vec<TestReport>,
}

impl SuiteReport {
    /// Number of failed tests.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.tests.iter().filter(|test| !test.passed()).count()
    }

    /// Save the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when serialisation or the write fails.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a report saved with [`SuiteReport::write_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the file cannot be read or parsed.
    pub fn read_json(path: &Path) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors raised while saving or loading reports.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("failed to read report {}", .path.display())]
    #[diagnostic(code(storyline::report::read))]
    Read {
        /// Report path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The report file could not be written.
    #[error("failed to write report {}", .path.display())]
    #[diagnostic(code(storyline::report::write))]
    Write {
        /// Report path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The report JSON does not describe a [`SuiteReport`].
    #[error("invalid report JSON in {}", .path.display())]
    #[diagnostic(
        code(storyline::report::json),
        help("reports are produced by SuiteReport::write_json")
    )]
    Json {
        /// Report path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
