//! Step execution.
//!
//! [`Steps`] is the surface test bodies call. Every call runs the same
//! pipeline in order: reconstruct the template, resolve the implementation,
//! await it, then record the literal text in the storyline. A failing
//! implementation returns its own error unchanged and leaves the storyline
//! untouched.

use crate::error::StepError;
use crate::kind::StepKind;
use crate::pom::{PageObjectModel, StepArgs};
use crate::resolver::resolve;
use crate::template::StepTemplate;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error};

/// Step-call surface bound to one test run's page object model.
///
/// Cloning is cheap; clones share the same model.
#[derive(Debug, Clone)]
pub struct Steps {
    pom: Option<Rc<RefCell<PageObjectModel>>>,
}

impl Steps {
    /// Bind to `pom`.
    #[must_use]
    pub const fn new(pom: Rc<RefCell<PageObjectModel>>) -> Self {
        Self { pom: Some(pom) }
    }

    /// A surface with no model; every call fails with
    /// [`StepError::MissingPageObjectModel`].
    #[must_use]
    pub const fn detached() -> Self {
        Self { pom: None }
    }

    /// Run a step of `kind`.
    ///
    /// Lookup uses [`StepKind::lookup_kind`], so `And` searches `when` and
    /// `But` searches `then`; the storyline keeps `kind` as written.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] when the step cannot be resolved, or the
    /// implementation's own error when it fails.
    pub async fn run(&self, kind: StepKind, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        let step = template.into();
        let lookup_kind = kind.lookup_kind();
        let name = lookup_kind.qualify(&step.lookup_key());
        let Some(pom) = &self.pom else {
            error!("unable to run '{name}': no Page Object Model configured");
            return Err(StepError::MissingPageObjectModel { name }.into());
        };
        let resolved = resolve(&pom.borrow(), lookup_kind, &name)?;
        let literal = kind.qualify(&step.literal_text());
        debug!(step = %literal, namespace = resolved.namespace.as_str(), "running step");
        (resolved.step)(StepArgs::new(step.into_args())).await?;
        pom.borrow_mut().storyline.record(literal);
        Ok(())
    }

    /// Run a `Given` step.
    ///
    /// # Errors
    ///
    /// See [`Steps::run`].
    pub async fn given(&self, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        self.run(StepKind::Given, template).await
    }

    /// Run a `When` step.
    ///
    /// # Errors
    ///
    /// See [`Steps::run`].
    pub async fn when(&self, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        self.run(StepKind::When, template).await
    }

    /// Run a `Then` step.
    ///
    /// # Errors
    ///
    /// See [`Steps::run`].
    pub async fn then(&self, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        self.run(StepKind::Then, template).await
    }

    /// Run an `And` step, resolved through the `when` namespace.
    ///
    /// # Errors
    ///
    /// See [`Steps::run`].
    pub async fn and(&self, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        self.run(StepKind::And, template).await
    }

    /// Run a `But` step, resolved through the `then` namespace.
    ///
    /// # Errors
    ///
    /// See [`Steps::run`].
    pub async fn but(&self, template: impl Into<StepTemplate>) -> anyhow::Result<()> {
        self.run(StepKind::But, template).await
    }

    /// Snapshot of the storyline recorded so far.
    #[must_use]
    pub fn storyline(&self) -> Vec<String> {
        self.pom
            .as_ref()
            .map(|pom| pom.borrow().storyline.entries().to_vec())
            .unwrap_or_default()
    }
}
