//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files to share fixtures and
//! helpers while keeping test modules small and avoiding duplication.

#![expect(
    clippy::allow_attributes,
    reason = "helpers are shared by test crates that each use a subset"
)]
#![allow(dead_code, reason = "helpers are shared by test crates that each use a subset")]

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use storyline::{Annotation, StepArgs, StepResult, SuiteReport, SuiteTag, TestReport};

/// Ordered log of which step implementations ran, shared with the closures
/// registered on a page object model.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`.
    pub fn push(&self, entry: impl Into<String>) -> StepResult {
        self.0.borrow_mut().push(entry.into());
        Ok(())
    }

    /// Snapshot of the entries recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Step implementation that logs `label` followed by its arguments.
    pub fn step(
        &self,
        label: &str,
    ) -> impl Fn(StepArgs) -> std::future::Ready<StepResult> + 'static {
        let log = self.clone();
        let label = label.to_owned();
        move |args: StepArgs| {
            let rendered: Vec<String> = args.into_iter().map(|value| value.to_string()).collect();
            let entry = if rendered.is_empty() {
                label.clone()
            } else {
                format!("{label}({})", rendered.join(", "))
            };
            std::future::ready(log.push(entry))
        }
    }
}

/// Build a suite report with one test per `(title, story, error)` triple.
pub fn sample_suite(tag: SuiteTag, title: &str, tests: &[(&str, &str, Option<&str>)]) -> SuiteReport {
    SuiteReport {
        title: tag.title(title),
        tag,
        tests: tests
            .iter()
            .map(|(name, story, error)| {
                let mut report = TestReport::new(*name);
                if let Some(message) = error {
                    report.fail(*message);
                }
                report.annotations.push(Annotation::story(*story));
                report
            })
            .collect(),
    }
}

/// Save `report` as `name` inside `dir`.
pub fn write_report(dir: &Path, name: &str, report: &SuiteReport) -> Result<PathBuf> {
    let path = dir.join(name);
    report
        .write_json(&path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
