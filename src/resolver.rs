//! Step resolution against a page object model.
//!
//! A fully-qualified lookup name such as `Given a user named p0` is reduced
//! to its phrase (`a user named p0`) and searched for in the namespace owned
//! by the keyword:
//!
//! | keyword         | namespace |
//! |-----------------|-----------|
//! | `Given`         | `given`   |
//! | `When`, `And`   | `when`    |
//! | `Then`, `But`   | `then`    |
//!
//! When that namespace is absent or lacks the phrase, `actions` is searched
//! regardless of keyword.

use crate::error::StepError;
use crate::kind::StepKind;
use crate::pom::{PageObjectModel, StepFn, StepTable};
use tracing::{debug, error};

/// Namespace a step implementation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// The `given` table.
    Given,
    /// The `when` table.
    When,
    /// The `then` table.
    Then,
    /// The shared `actions` table.
    Actions,
}

impl Namespace {
    /// Keyword-specific namespace searched first for `kind`.
    #[must_use]
    pub const fn for_kind(kind: StepKind) -> Self {
        match kind {
            StepKind::Given => Self::Given,
            StepKind::When | StepKind::And => Self::When,
            StepKind::Then | StepKind::But => Self::Then,
        }
    }

    /// Field name on [`PageObjectModel`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::Actions => "actions",
        }
    }

    fn table(self, pom: &PageObjectModel) -> Option<&StepTable> {
        match self {
            Self::Given => pom.given.as_ref(),
            Self::When => pom.when.as_ref(),
            Self::Then => pom.then.as_ref(),
            Self::Actions => Some(&pom.actions),
        }
    }
}

/// A resolved step implementation and where it came from.
#[derive(Clone)]
pub struct Resolved {
    /// The implementation.
    pub step: StepFn,
    /// Namespace holding it.
    pub namespace: Namespace,
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Strip `kind` and one following space from `name`.
///
/// Names that do not start with the keyword are returned unchanged.
///
/// ```
/// use storyline::{StepKind, resolver::phrase_of};
///
/// assert_eq!(phrase_of(StepKind::When, "When the user clicks p0"), "the user clicks p0");
/// assert_eq!(phrase_of(StepKind::When, "the user clicks p0"), "the user clicks p0");
/// ```
#[must_use]
pub fn phrase_of(kind: StepKind, name: &str) -> &str {
    name.strip_prefix(kind.as_str())
        .map_or(name, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Find the implementation for `name` on `pom`.
///
/// # Errors
///
/// Returns [`StepError::StepNotFound`] when neither the keyword's namespace
/// nor `actions` holds the phrase. The failure is logged before returning.
pub fn resolve(pom: &PageObjectModel, kind: StepKind, name: &str) -> Result<Resolved, StepError> {
    let phrase = phrase_of(kind, name);
    let preferred = Namespace::for_kind(kind);
    for namespace in [preferred, Namespace::Actions] {
        if let Some(step) = namespace.table(pom).and_then(|table| table.get(phrase)) {
            debug!(step = name, namespace = namespace.as_str(), "step resolved");
            return Ok(Resolved {
                step: step.clone(),
                namespace,
            });
        }
    }
    error!("unable to find method for: '{name}' on Page Object Model");
    Err(StepError::StepNotFound {
        name: name.to_owned(),
        help: format!(
            "register \"{phrase}\" in the `{}` or `actions` namespace",
            preferred.as_str()
        ),
    })
}
