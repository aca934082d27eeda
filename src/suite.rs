//! Tagged groups of tests.
//!
//! [`feature`], [`smoke_test`], [`flow`] and [`ci`] declare a [`Suite`]
//! whose title carries the matching tag (`@feature`, `@smoke`, `@flow`,
//! `@ci`). Tests are registered with [`Suite::test`] or its aliases
//! [`Suite::scenario`] and [`Suite::example`], and [`Suite::run`] executes
//! them one after another, each with its own page object model.
//!
//! # Examples
//!
//! ```
//! use storyline::{PageObjectModel, step, suite};
//!
//! let checkout = suite::feature("checkout", |s| {
//!     s.use_pom(|| {
//!         PageObjectModel::new()
//!             .given_step("a cart with p0 items", |_args| async { Ok(()) })
//!             .then_step("the total is shown", |_args| async { Ok(()) })
//!     });
//!     s.scenario("shows the total", |steps| async move {
//!         steps.given(step!("a cart with {} items", 2)).await?;
//!         steps.then("the total is shown").await
//!     });
//! });
//! assert_eq!(checkout.title(), "@feature checkout");
//!
//! let report = futures::executor::block_on(checkout.run());
//! assert_eq!(report.failures(), 0);
//! assert_eq!(
//!     report.tests[0].story(),
//!     Some("Given a cart with 2 items\nThen the total is shown")
//! );
//! ```

use crate::executor::Steps;
use crate::pom::PageObjectModel;
use crate::report::{SuiteReport, SuiteTag};
use crate::scenario::TestRun;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use tracing::{info, warn};

type TestBody = Box<dyn FnOnce(Steps) -> LocalBoxFuture<'static, anyhow::Result<()>>>;

/// Builds the page object model for a test.
pub type PomFactory = Rc<dyn Fn() -> PageObjectModel>;

struct TestCase {
    title: String,
    pom: Option<PomFactory>,
    body: TestBody,
}

/// A tagged group of tests.
pub struct Suite {
    title: String,
    tag: SuiteTag,
    pom: Option<PomFactory>,
    tests: Vec<TestCase>,
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("title", &self.title)
            .field("tag", &self.tag)
            .field(
                "tests",
                &self.tests.iter().map(|test| test.title.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Suite {
    /// Create an empty suite titled `"{tag} {title}"`.
    #[must_use]
    pub fn new(tag: SuiteTag, title: &str) -> Self {
        Self {
            title: tag.title(title),
            tag,
            pom: None,
            tests: Vec::new(),
        }
    }

    /// Tests covering a specific feature.
    #[must_use]
    pub fn feature(title: &str) -> Self {
        Self::new(SuiteTag::Feature, title)
    }

    /// Quick checks run before anything slower.
    #[must_use]
    pub fn smoke_test(title: &str) -> Self {
        Self::new(SuiteTag::Smoke, title)
    }

    /// Tests covering a user flow.
    #[must_use]
    pub fn flow(title: &str) -> Self {
        Self::new(SuiteTag::Flow, title)
    }

    /// Tests run within the CI pipeline.
    #[must_use]
    pub fn ci(title: &str) -> Self {
        Self::new(SuiteTag::Ci, title)
    }

    /// Tagged title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tag the suite was declared with.
    #[must_use]
    pub const fn tag(&self) -> SuiteTag {
        self.tag
    }

    /// Number of registered tests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns `true` if no test is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Override the default model for every test in the suite.
    pub fn use_pom(&mut self, factory: impl Fn() -> PageObjectModel + 'static) -> &mut Self {
        self.pom = Some(Rc::new(factory));
        self
    }

    /// Register a test.
    pub fn test<F, Fut>(&mut self, title: impl Into<String>, body: F) -> &mut Self
    where
        F: FnOnce(Steps) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.push(title.into(), None, body)
    }

    /// Register a test with its own model, overriding [`Suite::use_pom`].
    pub fn test_with_pom<F, Fut>(
        &mut self,
        title: impl Into<String>,
        factory: impl Fn() -> PageObjectModel + 'static,
        body: F,
    ) -> &mut Self
    where
        F: FnOnce(Steps) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.push(title.into(), Some(Rc::new(factory)), body)
    }

    /// Alias of [`Suite::test`].
    pub fn scenario<F, Fut>(&mut self, title: impl Into<String>, body: F) -> &mut Self
    where
        F: FnOnce(Steps) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.test(title, body)
    }

    /// Alias of [`Suite::test`].
    pub fn example<F, Fut>(&mut self, title: impl Into<String>, body: F) -> &mut Self
    where
        F: FnOnce(Steps) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.test(title, body)
    }

    fn push<F, Fut>(&mut self, title: String, pom: Option<PomFactory>, body: F) -> &mut Self
    where
        F: FnOnce(Steps) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.tests.push(TestCase {
            title,
            pom,
            body: Box::new(move |steps| body(steps).boxed_local()),
        });
        self
    }

    /// Run every test in registration order.
    ///
    /// Each test gets a fresh model from its own factory, else the suite's,
    /// else an empty default.
    pub async fn run(self) -> SuiteReport {
        let mut reports = Vec::with_capacity(self.tests.len());
        for case in self.tests {
            let mut run = TestRun::new(case.title);
            if let Some(factory) = case.pom.as_ref().or(self.pom.as_ref()) {
                run = run.with_pom(factory());
            }
            let report = run.run(case.body).await;
            if report.passed() {
                info!(suite = %self.title, test = %report.title, "test passed");
            } else {
                warn!(
                    suite = %self.title,
                    test = %report.title,
                    error = report.error.as_deref().unwrap_or_default(),
                    "test failed"
                );
            }
            reports.push(report);
        }
        SuiteReport {
            title: self.title,
            tag: self.tag,
            tests: reports,
        }
    }
}

fn declare(tag: SuiteTag, title: &str, define: impl FnOnce(&mut Suite)) -> Suite {
    let mut suite = Suite::new(tag, title);
    define(&mut suite);
    suite
}

/// Declare a `@feature` suite.
pub fn feature(title: &str, define: impl FnOnce(&mut Suite)) -> Suite {
    declare(SuiteTag::Feature, title, define)
}

/// Declare a `@smoke` suite.
pub fn smoke_test(title: &str, define: impl FnOnce(&mut Suite)) -> Suite {
    declare(SuiteTag::Smoke, title, define)
}

/// Declare a `@flow` suite.
pub fn flow(title: &str, define: impl FnOnce(&mut Suite)) -> Suite {
    declare(SuiteTag::Flow, title, define)
}

/// Declare a `@ci` suite.
pub fn ci(title: &str, define: impl FnOnce(&mut Suite)) -> Suite {
    declare(SuiteTag::Ci, title, define)
}
