//! Step keywords.
//!
//! A [`StepKind`] is the keyword that opens a step call. `And` and `But` have
//! no namespace of their own: they borrow the `when` and `then` vocabularies
//! respectively, while the storyline keeps the keyword the author wrote.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Keyword introducing a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Establishes context.
    Given,
    /// Performs the action under test.
    When,
    /// Asserts an outcome.
    Then,
    /// Continues the previous clause; resolved like `When`.
    And,
    /// Contrasts the previous clause; resolved like `Then`.
    But,
}

impl StepKind {
    /// Every keyword in declaration order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// The keyword as written in step text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// The keyword used to build the lookup name.
    ///
    /// ```
    /// use storyline::StepKind;
    ///
    /// assert_eq!(StepKind::And.lookup_kind(), StepKind::When);
    /// assert_eq!(StepKind::But.lookup_kind(), StepKind::Then);
    /// assert_eq!(StepKind::Given.lookup_kind(), StepKind::Given);
    /// ```
    #[must_use]
    pub const fn lookup_kind(self) -> Self {
        match self {
            Self::And => Self::When,
            Self::But => Self::Then,
            other => other,
        }
    }

    /// Prefix `text` with this keyword.
    ///
    /// Template text that already starts with whitespace is joined as-is so
    /// `" a user"` and `"a user"` both produce `"Given a user"`.
    #[must_use]
    pub fn qualify(self, text: &str) -> String {
        if text.starts_with(char::is_whitespace) {
            format!("{}{text}", self.as_str())
        } else {
            format!("{} {text}", self.as_str())
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name a step keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown step keyword: {0}")]
pub struct UnknownStepKind(pub String);

impl FromStr for StepKind {
    type Err = UnknownStepKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStepKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StepKind::Given, StepKind::Given)]
    #[case(StepKind::When, StepKind::When)]
    #[case(StepKind::Then, StepKind::Then)]
    #[case(StepKind::And, StepKind::When)]
    #[case(StepKind::But, StepKind::Then)]
    fn lookup_kind_shares_namespaces(#[case] kind: StepKind, #[case] expected: StepKind) {
        assert_eq!(kind.lookup_kind(), expected);
    }

    #[rstest]
    #[case("a user", "Given a user")]
    #[case(" a user", "Given a user")]
    #[case("", "Given ")]
    fn qualify_inserts_single_space(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(StepKind::Given.qualify(text), expected);
    }

    #[rstest]
    #[case("given", StepKind::Given)]
    #[case("WHEN", StepKind::When)]
    #[case(" But ", StepKind::But)]
    fn parses_keywords_case_insensitively(#[case] text: &str, #[case] expected: StepKind) {
        assert_eq!(text.parse::<StepKind>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_keyword() {
        assert_eq!(
            "Scenario".parse::<StepKind>(),
            Err(UnknownStepKind("Scenario".to_owned()))
        );
    }
}
