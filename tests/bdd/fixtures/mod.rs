//! Fixture modules for BDD scenarios.
//!
//! The `TestWorld` struct holds all state for one scenario: the page object
//! model being assembled, the steps the test body will run, and the report
//! produced once it has run. Non-Clone types use `RefCell<Option<T>>`.

// The `#[fixture]` macro generates types that cannot have doc comments attached
#![allow(
    missing_docs,
    reason = "Generated fixture types cannot have doc comments attached"
)]

use crate::common::CallLog;
use rstest::fixture;
use std::cell::RefCell;
use storyline::{PageObjectModel, StepKind, TestReport};

/// Combined test world for all BDD scenarios.
#[derive(Debug, Default)]
pub struct TestWorld {
    /// Model under construction; `None` means the run has no model at all.
    pub pom: RefCell<Option<PageObjectModel>>,
    /// Steps the test body executes, in order.
    pub planned: RefCell<Vec<(StepKind, String)>>,
    /// Implementations that ran, labelled `namespace:phrase`.
    pub calls: CallLog,
    /// Report produced by the last run.
    pub report: RefCell<Option<TestReport>>,
}

/// Fixture providing a fresh `TestWorld` for each scenario.
#[fixture]
pub fn world() -> TestWorld {
    TestWorld::default()
}

/// Strip surrounding double quotes from a string parameter.
///
/// rstest-bdd captures quoted strings including the quotes, so step
/// functions strip them before use.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(s)
}
