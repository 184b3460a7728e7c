//! Split message text into plain and matched segments.
//!
//! Matching is case-insensitive and literal. Occurrences are found left to
//! right and never overlap: after a match the search resumes right after it.
//! Concatenating the segment texts always gives back the input.
//!
//! ```
//! use chatstats::core::highlight::{highlight, HighlightSegment};
//!
//! let segments = highlight("cats and cats", "cat");
//! assert_eq!(
//!     segments,
//!     vec![
//!         HighlightSegment::matched("cat"),
//!         HighlightSegment::plain("s and "),
//!         HighlightSegment::matched("cat"),
//!         HighlightSegment::plain("s"),
//!     ]
//! );
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Whether a segment matched the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Plain,
    Match,
}

/// A run of text with its highlight kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl HighlightSegment {
    /// Creates a plain segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.into(),
        }
    }

    /// Creates a matched segment.
    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Match,
            text: text.into(),
        }
    }

    /// Returns `true` for matched segments.
    pub fn is_match(&self) -> bool {
        self.kind == SegmentKind::Match
    }
}

/// A compiled filter, reusable across many messages.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Compiles `filter` for highlighting. An empty filter highlights nothing.
    pub fn new(filter: &str) -> Self {
        if filter.is_empty() {
            return Self { pattern: None };
        }

        let pattern = RegexBuilder::new(&regex::escape(filter))
            .case_insensitive(true)
            .build();

        match pattern {
            Ok(re) => Self { pattern: Some(re) },
            Err(err) => {
                // Only reachable when the escaped filter exceeds the regex size limit
                warn!(?err, len = filter.len(), "filter too large to highlight");
                Self { pattern: None }
            }
        }
    }

    /// Returns `true` if this highlighter can produce matches.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Splits `text` into segments.
    ///
    /// With no active filter the whole text is one plain segment. Otherwise
    /// empty gaps are skipped, so adjacent matches produce no empty plain
    /// segment between them.
    pub fn segments(&self, text: &str) -> Vec<HighlightSegment> {
        let Some(re) = &self.pattern else {
            return vec![HighlightSegment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut cursor = 0;

        for m in re.find_iter(text) {
            if m.start() > cursor {
                segments.push(HighlightSegment::plain(&text[cursor..m.start()]));
            }
            segments.push(HighlightSegment::matched(m.as_str()));
            cursor = m.end();
        }

        if cursor < text.len() {
            segments.push(HighlightSegment::plain(&text[cursor..]));
        }

        segments
    }
}

/// Splits `text` into segments for `filter`.
///
/// Compiles the filter on every call; use [`Highlighter`] for batches.
pub fn highlight(text: &str, filter: &str) -> Vec<HighlightSegment> {
    Highlighter::new(filter).segments(text)
}
