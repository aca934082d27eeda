//! Page object model.
//!
//! A [`PageObjectModel`] carries the step implementations available to one
//! test run, split into the `given`, `when` and `then` vocabularies plus the
//! shared `actions` table, together with the [`Storyline`] recorded while the
//! run executes.
//!
//! # Examples
//!
//! ```
//! use storyline::PageObjectModel;
//!
//! let pom = PageObjectModel::new()
//!     .given_step("a user is logged in", |_args| async { Ok(()) })
//!     .then_step("they see a welcome message", |_args| async { Ok(()) })
//!     .action("the page is reloaded", |_args| async { Ok(()) });
//! assert!(pom.given.is_some());
//! assert!(pom.when.is_none());
//! assert_eq!(pom.actions.len(), 1);
//! ```

use crate::storyline::Storyline;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Result of a step implementation.
pub type StepResult = anyhow::Result<()>;

/// Future returned by a step implementation.
pub type StepFuture = LocalBoxFuture<'static, StepResult>;

/// Shared handle to a step implementation.
pub type StepFn = Rc<dyn Fn(StepArgs) -> StepFuture>;

/// Arguments captured from a step call, in call order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepArgs(Vec<Value>);

impl StepArgs {
    /// Wrap raw argument values.
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the step was called without arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Deserialize the argument at `index` into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error when the argument is missing or has the wrong shape.
    ///
    /// ```
    /// use storyline::StepArgs;
    /// use serde_json::json;
    ///
    /// let args = StepArgs::new(vec![json!("ada"), json!(3)]);
    /// let count: u32 = args.get(1).unwrap();
    /// assert_eq!(count, 3);
    /// assert!(args.get::<u32>(0).is_err());
    /// ```
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> anyhow::Result<T> {
        let value = self
            .value(index)
            .ok_or_else(|| anyhow::anyhow!("step argument {index} is missing"))?;
        serde_json::from_value(value.clone())
            .map_err(|err| anyhow::anyhow!("step argument {index} is invalid: {err}"))
    }

    /// Raw values in call order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Consume the wrapper, yielding the raw values.
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for StepArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl IntoIterator for StepArgs {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Box an async closure into a [`StepFn`].
pub fn step_fn<F, Fut>(f: F) -> StepFn
where
    F: Fn(StepArgs) -> Fut + 'static,
    Fut: Future<Output = StepResult> + 'static,
{
    Rc::new(move |args| f(args).boxed_local())
}

/// Mapping from step phrase to implementation.
///
/// Phrases are lookup keys without the keyword: `"a user named p0"`.
#[derive(Clone, Default)]
pub struct StepTable {
    steps: HashMap<String, StepFn>,
}

impl StepTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `phrase`, replacing any previous entry.
    pub fn insert<F, Fut>(&mut self, phrase: impl Into<String>, f: F)
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.steps.insert(phrase.into(), step_fn(f));
    }

    /// Register an already boxed implementation.
    pub fn insert_fn(&mut self, phrase: impl Into<String>, f: StepFn) {
        self.steps.insert(phrase.into(), f);
    }

    /// Builder form of [`StepTable::insert`].
    #[must_use]
    pub fn with<F, Fut>(mut self, phrase: impl Into<String>, f: F) -> Self
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.insert(phrase, f);
        self
    }

    /// Implementation registered for `phrase`.
    #[must_use]
    pub fn get(&self, phrase: &str) -> Option<&StepFn> {
        self.steps.get(phrase)
    }

    /// Returns `true` if `phrase` is registered.
    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        self.steps.contains_key(phrase)
    }

    /// Number of registered phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no phrase is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Registered phrases in sorted order.
    #[must_use]
    pub fn phrases(&self) -> Vec<&str> {
        let mut phrases: Vec<&str> = self.steps.keys().map(String::as_str).collect();
        phrases.sort_unstable();
        phrases
    }
}

impl fmt::Debug for StepTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.phrases()).finish()
    }
}

/// Step vocabularies and storyline for a single test run.
#[derive(Debug, Default)]
pub struct PageObjectModel {
    /// Fallback steps usable from any keyword.
    pub actions: StepTable,
    /// Steps reachable from `Given`.
    pub given: Option<StepTable>,
    /// Steps reachable from `When` and `And`.
    pub when: Option<StepTable>,
    /// Steps reachable from `Then` and `But`.
    pub then: Option<StepTable>,
    /// Literal descriptions of the steps executed so far.
    pub storyline: Storyline,
}

impl PageObjectModel {
    /// Create a model with no steps and an empty storyline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the `actions` table.
    #[must_use]
    pub fn with_actions(mut self, table: StepTable) -> Self {
        self.actions = table;
        self
    }

    /// Replace the `given` table.
    #[must_use]
    pub fn with_given(mut self, table: StepTable) -> Self {
        self.given = Some(table);
        self
    }

    /// Replace the `when` table.
    #[must_use]
    pub fn with_when(mut self, table: StepTable) -> Self {
        self.when = Some(table);
        self
    }

    /// Replace the `then` table.
    #[must_use]
    pub fn with_then(mut self, table: StepTable) -> Self {
        self.then = Some(table);
        self
    }

    /// Register a `given` step, creating the table on first use.
    #[must_use]
    pub fn given_step<F, Fut>(mut self, phrase: impl Into<String>, f: F) -> Self
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.given.get_or_insert_with(StepTable::new).insert(phrase, f);
        self
    }

    /// Register a `when` step, creating the table on first use.
    #[must_use]
    pub fn when_step<F, Fut>(mut self, phrase: impl Into<String>, f: F) -> Self
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.when.get_or_insert_with(StepTable::new).insert(phrase, f);
        self
    }

    /// Register a `then` step, creating the table on first use.
    #[must_use]
    pub fn then_step<F, Fut>(mut self, phrase: impl Into<String>, f: F) -> Self
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.then.get_or_insert_with(StepTable::new).insert(phrase, f);
        self
    }

    /// Register a shared action.
    #[must_use]
    pub fn action<F, Fut>(mut self, phrase: impl Into<String>, f: F) -> Self
    where
        F: Fn(StepArgs) -> Fut + 'static,
        Fut: Future<Output = StepResult> + 'static,
    {
        self.actions.insert(phrase, f);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_model_has_only_actions() {
        let pom = PageObjectModel::default();
        assert!(pom.actions.is_empty());
        assert!(pom.given.is_none());
        assert!(pom.when.is_none());
        assert!(pom.then.is_none());
        assert!(pom.storyline.is_empty());
    }

    #[test]
    fn later_registration_replaces_phrase() {
        let table = StepTable::new()
            .with("a step", |_args| async { Ok(()) })
            .with("a step", |_args| async { anyhow::bail!("replaced") });
        assert_eq!(table.len(), 1);
        assert_eq!(table.phrases(), ["a step"]);
    }

    #[test]
    fn step_args_reports_missing_index() {
        let args = StepArgs::new(vec![json!("ada")]);
        let err = args.get::<String>(3).expect_err("index 3 is out of range");
        assert_eq!(err.to_string(), "step argument 3 is missing");
    }

    #[test]
    fn step_args_deserialises_structured_values() {
        let args = StepArgs::new(vec![json!({"sku": "A1", "qty": 2})]);
        let item: HashMap<String, Value> = args.get(0).expect("object argument");
        assert_eq!(item.get("qty"), Some(&json!(2)));
    }
}
