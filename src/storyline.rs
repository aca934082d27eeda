//! Storyline recording.
//!
//! A [`Storyline`] collects the literal description of every step that
//! completed successfully during a test run. At teardown it is flushed once
//! into a single `story` annotation whose description is the entries joined
//! with newlines.

use crate::report::{Annotation, ReportSink};
use tracing::{debug, warn};

/// Separator placed between entries when a storyline is flushed.
pub const STORY_SEPARATOR: &str = "\n";

/// Lifecycle of a storyline within one test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryState {
    /// Nothing recorded yet.
    #[default]
    Idle,
    /// At least one step recorded.
    Recording,
    /// Flushed into the report; terminal.
    Flushed,
}

/// Ordered record of executed steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Storyline {
    entries: Vec<String>,
    state: StoryState,
}

impl Storyline {
    /// Create an empty storyline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`.
    ///
    /// Entries recorded after the storyline was flushed are dropped.
    pub fn record(&mut self, entry: impl Into<String>) {
        let text = entry.into();
        if self.state == StoryState::Flushed {
            warn!(entry = %text, "storyline already flushed; entry dropped");
            return;
        }
        debug!(entry = %text, "storyline entry recorded");
        self.entries.push(text);
        self.state = StoryState::Recording;
    }

    /// Recorded entries in execution order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StoryState {
        self.state
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined with [`STORY_SEPARATOR`].
    #[must_use]
    pub fn text(&self) -> String {
        self.entries.join(STORY_SEPARATOR)
    }

    /// Attach the storyline to `sink` as a `story` annotation.
    ///
    /// An empty storyline still produces an annotation. Only the first call
    /// has an effect; it returns `true` when an annotation was attached.
    ///
    /// ```
    /// use storyline::{Annotation, Storyline};
    ///
    /// let mut story = Storyline::new();
    /// story.record("Given a user is logged in");
    /// story.record("Then they see a welcome message");
    ///
    /// let mut annotations: Vec<Annotation> = Vec::new();
    /// assert!(story.flush(&mut annotations));
    /// assert!(!story.flush(&mut annotations));
    /// assert_eq!(
    ///     annotations,
    ///     [Annotation::story("Given a user is logged in\nThen they see a welcome message")]
    /// );
    /// ```
    pub fn flush(&mut self, sink: &mut dyn ReportSink) -> bool {
        if self.state == StoryState::Flushed {
            return false;
        }
        sink.annotate(Annotation::story(self.text()));
        self.state = StoryState::Flushed;
        debug!(entries = self.entries.len(), "storyline flushed");
        true
    }
}
