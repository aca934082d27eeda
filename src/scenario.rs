//! Per-test lifecycle.
//!
//! A [`TestRun`] owns the page object model for exactly one test. It hands
//! out [`Steps`] bound to that model and, once the body has finished, runs
//! the teardown hook that flushes the storyline into the test's report.
//!
//! # Examples
//!
//! ```
//! use storyline::{PageObjectModel, TestRun, step};
//!
//! let pom = PageObjectModel::new()
//!     .given_step("a user named p0", |_args| async { Ok(()) });
//! let run = TestRun::new("greets the user").with_pom(pom);
//! let report = futures::executor::block_on(run.run(|steps| async move {
//!     steps.given(step!("a user named {}", "ada")).await
//! }));
//! assert!(report.passed());
//! assert_eq!(report.story(), Some("Given a user named ada"));
//! ```

use crate::executor::Steps;
use crate::pom::PageObjectModel;
use crate::report::TestReport;
use futures::FutureExt;
use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use tracing::{Instrument, info_span, warn};

/// State of one test execution.
#[derive(Debug)]
pub struct TestRun {
    report: TestReport,
    pom: Option<Rc<RefCell<PageObjectModel>>>,
    completed: bool,
}

impl TestRun {
    /// Start a run with a fresh, empty page object model.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            report: TestReport::new(title),
            pom: Some(Rc::new(RefCell::new(PageObjectModel::default()))),
            completed: false,
        }
    }

    /// Replace the default model before the body runs.
    #[must_use]
    pub fn with_pom(mut self, pom: PageObjectModel) -> Self {
        self.pom = Some(Rc::new(RefCell::new(pom)));
        self
    }

    /// Run without any model; teardown then attaches nothing.
    #[must_use]
    pub fn without_pom(mut self) -> Self {
        self.pom = None;
        self
    }

    /// Test title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.report.title
    }

    /// Step surface bound to this run's model.
    #[must_use]
    pub fn steps(&self) -> Steps {
        self.pom.clone().map_or_else(Steps::detached, Steps::new)
    }

    /// Run `body` to completion and tear down.
    ///
    /// Errors and panics from the body mark the report failed; the storyline
    /// is flushed either way.
    pub async fn run<F, Fut>(self, body: F) -> TestReport
    where
        F: FnOnce(Steps) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let span = info_span!("test", title = %self.title());
        let steps = self.steps();
        let result = AssertUnwindSafe(async move { body(steps).await })
            .catch_unwind()
            .instrument(span)
            .await
            .unwrap_or_else(|payload| Err(anyhow::anyhow!("test panicked: {}", panic_message(&*payload))));
        self.complete(result)
    }

    /// Teardown hook: record the outcome and flush the storyline.
    #[must_use]
    pub fn complete(mut self, result: anyhow::Result<()>) -> TestReport {
        if let Err(err) = result {
            self.report.fail(format!("{err:#}"));
        }
        if let Some(pom) = &self.pom {
            pom.borrow_mut().storyline.flush(&mut self.report);
        }
        self.completed = true;
        std::mem::replace(&mut self.report, TestReport::new(String::new()))
    }
}

impl Drop for TestRun {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let Some(pom) = &self.pom else {
            return;
        };
        if let Ok(model) = pom.try_borrow() {
            warn!(
                test = %self.report.title,
                story = %model.storyline.text(),
                "test run dropped before teardown"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
