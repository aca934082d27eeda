//! Storyline core library.
//!
//! Behaviour-driven steps (`Given`, `When`, `Then`, `And`, `But`) are written
//! as templates and resolved at runtime against a per-test
//! [`PageObjectModel`]. Every step that completes is recorded in the run's
//! [`Storyline`], which is attached to the test report as a `story`
//! annotation at teardown.
//!
//! ```
//! use storyline::{PageObjectModel, TestRun, step};
//!
//! let pom = PageObjectModel::new()
//!     .given_step("a user is logged in", |_args| async { Ok(()) })
//!     .then_step("they see a welcome message", |_args| async { Ok(()) });
//!
//! let report = futures::executor::block_on(TestRun::new("welcome").with_pom(pom).run(
//!     |steps| async move {
//!         steps.given(step!("a user is logged in")).await?;
//!         steps.then(step!("they see a welcome message")).await
//!     },
//! ));
//! assert_eq!(
//!     report.story(),
//!     Some("Given a user is logged in\nThen they see a welcome message")
//! );
//! ```

pub mod cli;
pub mod error;
pub mod executor;
pub mod kind;
pub mod pom;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod scenario;
pub mod storyline;
pub mod suite;
pub mod template;

#[doc(hidden)]
pub use serde_json;

pub use error::StepError;
pub use executor::Steps;
pub use kind::StepKind;
pub use pom::{PageObjectModel, StepArgs, StepFn, StepFuture, StepResult, StepTable};
pub use report::{Annotation, Outcome, ReportSink, SuiteReport, SuiteTag, TestReport};
pub use scenario::TestRun;
pub use storyline::{StoryState, Storyline};
pub use suite::Suite;
pub use template::StepTemplate;
