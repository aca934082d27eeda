//! Report rendering for the `render` and `summary` commands.

use crate::cli::Format;
use crate::report::{Outcome, SuiteReport, TestReport};
use anyhow::{Context, Result};

const NO_STEPS: &str = "(no steps recorded)";

const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "passed",
        Outcome::Failed => "failed",
    }
}

/// Drop passing tests from every suite.
#[must_use]
pub fn only_failed(reports: Vec<SuiteReport>) -> Vec<SuiteReport> {
    reports
        .into_iter()
        .map(|mut suite| {
            suite.tests.retain(|test| !test.passed());
            suite
        })
        .collect()
}

/// Render `reports` in `format`.
///
/// # Errors
///
/// Returns an error when JSON serialisation fails.
pub fn render(reports: &[SuiteReport], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(reports)),
        Format::Markdown => Ok(render_markdown(reports)),
        Format::Json => serde_json::to_string_pretty(reports).context("serialising reports"),
    }
}

fn story_lines(test: &TestReport) -> Vec<&str> {
    test.story()
        .filter(|story| !story.is_empty())
        .map(|story| story.lines().collect())
        .unwrap_or_default()
}

/// Indented plain-text rendering.
#[must_use]
pub fn render_text(reports: &[SuiteReport]) -> String {
    let mut out = String::new();
    for suite in reports {
        out.push_str(&suite.title);
        out.push('\n');
        for test in &suite.tests {
            out.push_str(&format!("  [{}] {}", outcome_label(test.outcome), test.title));
            if let Some(error) = &test.error {
                out.push_str(&format!(": {error}"));
            }
            out.push('\n');
            let lines = story_lines(test);
            if lines.is_empty() {
                out.push_str(&format!("    {NO_STEPS}\n"));
            }
            for line in lines {
                out.push_str(&format!("    {line}\n"));
            }
        }
    }
    out
}

/// Markdown rendering: one section per suite, one subsection per test.
#[must_use]
pub fn render_markdown(reports: &[SuiteReport]) -> String {
    let mut out = String::new();
    for suite in reports {
        out.push_str(&format!("## {}\n\n", suite.title));
        for test in &suite.tests {
            out.push_str(&format!(
                "### {} ({})\n\n",
                test.title,
                outcome_label(test.outcome)
            ));
            if let Some(error) = &test.error {
                out.push_str(&format!("> {error}\n\n"));
            }
            let lines = story_lines(test);
            if lines.is_empty() {
                out.push_str(&format!("_{NO_STEPS}_\n\n"));
                continue;
            }
            for line in lines {
                out.push_str(&format!("- {line}\n"));
            }
            out.push('\n');
        }
    }
    out
}

/// One line per suite with pass and fail counts.
#[must_use]
pub fn render_summary(reports: &[SuiteReport]) -> String {
    reports
        .iter()
        .map(|suite| {
            let failed = suite.failures();
            let passed = suite.tests.len() - failed;
            format!("{}: {passed} passed, {failed} failed\n", suite.title)
        })
        .collect()
}
