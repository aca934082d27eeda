//! Step template reconstruction.
//!
//! A step call is a sequence of literal text fragments interleaved with
//! interpolated argument values. Two strings are derived from it:
//!
//! - the *lookup key*, where each argument is replaced by a positional
//!   placeholder (`p0`, `p1`, ...), so calls that differ only in argument
//!   values find the same implementation;
//! - the *literal text*, where each argument is replaced by its display form,
//!   used for the storyline.
//!
//! # Examples
//!
//! ```
//! use storyline::step;
//!
//! let template = step!("a user named {} has {} items", "ada", 3);
//! assert_eq!(template.lookup_key(), "a user named p0 has p1 items");
//! assert_eq!(template.literal_text(), "a user named ada has 3 items");
//! ```

use serde_json::Value;
use std::borrow::Cow;

/// Prefix of the positional placeholders written into lookup keys.
pub const PLACEHOLDER_PREFIX: char = 'p';

/// Marker splitting a pattern passed to [`StepTemplate::from_pattern`].
pub const ARGUMENT_MARKER: &str = "{}";

/// Literal fragments and argument values captured from one step call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepTemplate {
    fragments: Vec<String>,
    args: Vec<Value>,
}

impl StepTemplate {
    /// Build a template from raw fragments and arguments.
    ///
    /// The usual shape has one more fragment than arguments, but any counts
    /// are accepted; the missing side is skipped during reconstruction.
    #[must_use]
    pub fn new<I, S>(fragments: I, args: Vec<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            args,
        }
    }

    /// Build a template by splitting `pattern` at each `{}` marker.
    ///
    /// Every `{}` is a marker; there is no escape for literal braces. Build
    /// the template with [`StepTemplate::new`] when step text must contain
    /// `{}`.
    ///
    /// ```
    /// use storyline::StepTemplate;
    /// use serde_json::json;
    ///
    /// let template = StepTemplate::from_pattern("{} clicks {}", vec![json!("ada"), json!("save")]);
    /// assert_eq!(template.fragments(), ["", " clicks ", ""]);
    /// ```
    #[must_use]
    pub fn from_pattern(pattern: &str, args: Vec<Value>) -> Self {
        Self::new(pattern.split(ARGUMENT_MARKER), args)
    }

    /// Literal fragments in call order.
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Argument values in call order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Consume the template, yielding its arguments.
    #[must_use]
    pub fn into_args(self) -> Vec<Value> {
        self.args
    }

    /// Placeholder form of the step text.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        lookup_key(&self.fragments, &self.args)
    }

    /// Argument-substituted form of the step text.
    #[must_use]
    pub fn literal_text(&self) -> String {
        literal_text(&self.fragments, &self.args)
    }
}

impl From<&str> for StepTemplate {
    fn from(text: &str) -> Self {
        Self::new([text], Vec::new())
    }
}

impl From<String> for StepTemplate {
    fn from(text: String) -> Self {
        Self::new([text], Vec::new())
    }
}

/// Interleave `fragments` with `p{index}` placeholders.
#[must_use]
pub fn lookup_key<S: AsRef<str>>(fragments: &[S], args: &[Value]) -> String {
    interleave(fragments, args.len(), |index, out| {
        out.push(PLACEHOLDER_PREFIX);
        out.push_str(&index.to_string());
    })
}

/// Interleave `fragments` with the display form of each argument.
#[must_use]
pub fn literal_text<S: AsRef<str>>(fragments: &[S], args: &[Value]) -> String {
    interleave(fragments, args.len(), |index, out| {
        if let Some(value) = args.get(index) {
            out.push_str(&display_value(value));
        }
    })
}

/// Render an argument for human-readable output.
///
/// Strings appear without JSON quotes; everything else uses its JSON text.
#[must_use]
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}

/// Number of `{}` markers in `pattern`, counted left to right without
/// overlap, as [`StepTemplate::from_pattern`] splits them.
#[must_use]
pub const fn marker_count(pattern: &str) -> usize {
    let mut rest = pattern.as_bytes();
    let mut count = 0;
    loop {
        match rest {
            [b'{', b'}', after @ ..] => {
                count += 1;
                rest = after;
            }
            [_, after @ ..] => rest = after,
            [] => return count,
        }
    }
}

fn interleave<S: AsRef<str>>(
    fragments: &[S],
    arg_count: usize,
    mut write_arg: impl FnMut(usize, &mut String),
) -> String {
    let mut out = String::new();
    let positions = fragments.len().max(arg_count) + 1;
    for index in 0..positions {
        if let Some(fragment) = fragments.get(index) {
            out.push_str(fragment.as_ref());
        }
        if index < arg_count {
            write_arg(index, &mut out);
        }
    }
    out
}

/// Build a [`StepTemplate`] from a `{}`-delimited pattern and arguments.
///
/// Each argument is converted with `serde_json::Value::from`, so string
/// slices, owned strings, numbers, booleans and vectors are accepted.
///
/// ```
/// use storyline::step;
///
/// let template = step!("the cart holds {} items", 2);
/// assert_eq!(template.lookup_key(), "the cart holds p0 items");
/// ```
///
/// The pattern must hold exactly one `{}` per argument; a mismatch fails to
/// compile. `{}` cannot be escaped, so text with literal braces goes through
/// [`StepTemplate::new`].
///
/// ```compile_fail
/// use storyline::step;
///
/// let template = step!("a {} blob");
/// ```
#[macro_export]
macro_rules! step {
    ($pattern:literal $(, $arg:expr)* $(,)?) => {{
        const _: () = ::core::assert!(
            $crate::template::marker_count($pattern)
                == <[&str]>::len(&[$(::core::stringify!($arg)),*]),
            "step! needs exactly one argument per `{{}}` marker"
        );
        $crate::StepTemplate::from_pattern(
            $pattern,
            ::std::vec![$($crate::serde_json::Value::from($arg)),*],
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(vec!["a user is logged in"], vec![], "a user is logged in")]
    #[case(vec!["a user named ", ""], vec![json!("ada")], "a user named p0")]
    #[case(vec!["", " and ", " match"], vec![json!(1), json!(2)], "p0 and p1 match")]
    fn lookup_key_replaces_arguments_with_placeholders(
        #[case] fragments: Vec<&str>,
        #[case] args: Vec<Value>,
        #[case] expected: &str,
    ) {
        assert_eq!(lookup_key(&fragments, &args), expected);
    }

    #[test]
    fn lookup_key_ignores_argument_values() {
        let fragments = ["the user ", " buys ", " apples"];
        let first = lookup_key(&fragments, &[json!("ada"), json!(3)]);
        let second = lookup_key(&fragments, &[json!({"name": "bob"}), json!(null)]);
        assert_eq!(first, second);
    }

    #[test]
    fn literal_text_keeps_trailing_fragment() {
        let text = literal_text(&["the user ", " buys ", " apples"], &[json!("ada"), json!(3)]);
        assert_eq!(text, "the user ada buys 3 apples");
    }

    #[rstest]
    #[case(vec!["only text"], vec![json!(1), json!(2)], "only text12", "only textp0p1")]
    #[case(vec!["a", "b", "c"], vec![json!("x")], "axbc", "ap0bc")]
    #[case(vec![], vec![json!("x")], "x", "p0")]
    #[case(vec![], vec![], "", "")]
    fn mismatched_counts_skip_missing_side(
        #[case] fragments: Vec<&str>,
        #[case] args: Vec<Value>,
        #[case] literal: &str,
        #[case] key: &str,
    ) {
        assert_eq!(literal_text(&fragments, &args), literal);
        assert_eq!(lookup_key(&fragments, &args), key);
    }

    #[rstest]
    #[case(json!("plain"), "plain")]
    #[case(json!(42), "42")]
    #[case(json!(true), "true")]
    #[case(json!(null), "null")]
    #[case(json!(["a", 1]), r#"["a",1]"#)]
    fn display_value_unquotes_strings_only(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(display_value(&value), expected);
    }

    #[test]
    fn step_macro_splits_pattern() {
        let template = crate::step!("{} logs in as {}", "ada", String::from("admin"));
        assert_eq!(template.fragments(), ["", " logs in as ", ""]);
        assert_eq!(template.args(), [json!("ada"), json!("admin")]);
    }

    #[rstest]
    #[case("the page loads", 0)]
    #[case("{} clicks {}", 2)]
    #[case("{}{}", 2)]
    #[case("{{}", 1)]
    #[case("{ }", 0)]
    fn marker_count_matches_pattern_split(#[case] pattern: &str, #[case] expected: usize) {
        assert_eq!(marker_count(pattern), expected);
        assert_eq!(pattern.split(ARGUMENT_MARKER).count(), expected + 1);
    }

    #[test]
    fn literal_braces_go_through_raw_fragments() {
        let template = StepTemplate::new(["the {} blob is shown"], Vec::new());
        assert_eq!(template.literal_text(), "the {} blob is shown");
        assert_eq!(template.lookup_key(), "the {} blob is shown");
    }

    #[test]
    fn plain_text_converts_without_arguments() {
        let template = StepTemplate::from("the page loads");
        assert_eq!(template.lookup_key(), "the page loads");
        assert!(template.args().is_empty());
    }
}
