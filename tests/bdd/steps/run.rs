//! Step definitions that run the assembled test and inspect its report.

use crate::bdd::fixtures::{TestWorld, strip_quotes};
use anyhow::{Context, Result, ensure};
use futures::executor::block_on;
use rstest_bdd_macros::{then, when};
use storyline::{TestReport, TestRun};

const LINE_JOIN: &str = " / ";

fn with_report<R>(world: &TestWorld, f: impl FnOnce(&TestReport) -> Result<R>) -> Result<R> {
    let report = world.report.borrow();
    let report = report.as_ref().context("the test has not run yet")?;
    f(report)
}

#[when("the test runs")]
fn the_test_runs(world: &TestWorld) -> Result<()> {
    let planned = world.planned.take();
    let run = match world.pom.take() {
        Some(pom) => TestRun::new("scenario").with_pom(pom),
        None => TestRun::new("scenario").without_pom(),
    };
    let report = block_on(run.run(|steps| async move {
        for (kind, phrase) in planned {
            steps.run(kind, phrase).await?;
        }
        Ok(())
    }));
    *world.report.borrow_mut() = Some(report);
    Ok(())
}

#[then("the test passes")]
fn the_test_passes(world: &TestWorld) -> Result<()> {
    with_report(world, |report| {
        ensure!(report.passed(), "test failed: {:?}", report.error);
        Ok(())
    })
}

#[then("the test fails with {message}")]
fn the_test_fails_with(world: &TestWorld, message: String) -> Result<()> {
    let expected = strip_quotes(&message);
    with_report(world, |report| {
        ensure!(!report.passed(), "test passed unexpectedly");
        ensure!(
            report.error.as_deref() == Some(expected),
            "error {:?} is not '{expected}'",
            report.error
        );
        Ok(())
    })
}

#[then("the story reads {story}")]
fn the_story_reads(world: &TestWorld, story: String) -> Result<()> {
    let expected = strip_quotes(&story);
    with_report(world, |report| {
        let actual = report
            .story()
            .context("no story attached")?
            .replace('\n', LINE_JOIN);
        ensure!(actual == expected, "story '{actual}' is not '{expected}'");
        Ok(())
    })
}

#[then("the story is empty")]
fn the_story_is_empty(world: &TestWorld) -> Result<()> {
    with_report(world, |report| {
        ensure!(
            report.story() == Some(""),
            "expected an empty story, got {:?}",
            report.story()
        );
        Ok(())
    })
}

#[then("no story is attached")]
fn no_story_is_attached(world: &TestWorld) -> Result<()> {
    with_report(world, |report| {
        ensure!(
            report.annotations.is_empty(),
            "unexpected annotations: {:?}",
            report.annotations
        );
        Ok(())
    })
}

#[then("the implementations called were {calls}")]
fn implementations_called(world: &TestWorld, calls: String) -> Result<()> {
    let expected = strip_quotes(&calls);
    let actual = world.calls.entries().join(LINE_JOIN);
    ensure!(actual == expected, "calls '{actual}' are not '{expected}'");
    Ok(())
}

#[then("no implementation was called")]
fn no_implementation_was_called(world: &TestWorld) -> Result<()> {
    let entries = world.calls.entries();
    ensure!(entries.is_empty(), "unexpected calls: {entries:?}");
    Ok(())
}
