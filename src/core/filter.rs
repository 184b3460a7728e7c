//! Filter messages by text content.
//!
//! This module provides [`FilterSettings`] for defining the text query and
//! [`filter_messages`] for selecting matching messages.
//!
//! # Examples
//!
//! ```
//! use chatstats::core::filter::{FilterSettings, filter_messages};
//! use chatstats::{Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! let alice = User::new("1", "alice", "Alice");
//! let messages = vec![
//!     Message::new(alice.clone(), "I like Cats", ts),
//!     Message::new(alice.clone(), "dogs are fine", ts),
//!     Message::new(alice, "cat pictures", ts),
//! ];
//!
//! // Case-insensitive by default
//! let settings = FilterSettings::new().with_text("cat");
//! let filtered = filter_messages(&messages, &settings);
//! assert_eq!(filtered.len(), 2);
//!
//! let settings = settings.with_case_sensitive(true);
//! assert_eq!(filter_messages(&messages, &settings).len(), 1);
//! ```
//!
//! # Behavior Notes
//!
//! - Matching is plain substring containment; no pattern syntax is interpreted
//! - An empty query matches every message
//! - The result borrows from the input and keeps its order

use serde::{Deserialize, Serialize};

use crate::Message;

/// User-editable filter state.
///
/// `auto_apply` doesn't change what the filter matches; it tells a
/// [`StatsSession`](crate::session::StatsSession) whether to recompute on every
/// change or only on an explicit apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Substring to look for in message content.
    pub text_filter: String,

    /// Compare without lower-casing (default: false).
    pub case_sensitive: bool,

    /// Recompute derived views on every settings change (default: false).
    pub auto_apply: bool,
}

impl FilterSettings {
    /// Creates settings that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text query.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_filter = text.into();
        self
    }

    /// Sets case sensitivity.
    #[must_use]
    pub fn with_case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Sets auto-apply.
    #[must_use]
    pub fn with_auto_apply(mut self, enabled: bool) -> Self {
        self.auto_apply = enabled;
        self
    }

    /// Returns `true` if the text query is non-empty.
    pub fn is_active(&self) -> bool {
        !self.text_filter.is_empty()
    }

    /// Returns `true` if both settings select the same messages.
    ///
    /// `auto_apply` is ignored.
    pub fn same_query(&self, other: &Self) -> bool {
        self.text_filter == other.text_filter && self.case_sensitive == other.case_sensitive
    }
}

/// Returns the messages whose content contains the query.
///
/// The result is a subsequence of `messages` in the original order. With an
/// empty query every message is returned.
pub fn filter_messages<'a>(messages: &'a [Message], settings: &FilterSettings) -> Vec<&'a Message> {
    filter_indices(messages, settings)
        .into_iter()
        .map(|i| &messages[i])
        .collect()
}

/// Like [`filter_messages`], but returns positions into `messages`.
pub fn filter_indices(messages: &[Message], settings: &FilterSettings) -> Vec<usize> {
    let positions = messages.iter().enumerate();

    if !settings.is_active() {
        return positions.map(|(i, _)| i).collect();
    }

    if settings.case_sensitive {
        return positions
            .filter(|(_, msg)| msg.content.contains(&settings.text_filter))
            .map(|(i, _)| i)
            .collect();
    }

    // Lower-case the query once rather than per message
    let needle = settings.text_filter.to_lowercase();
    positions
        .filter(|(_, msg)| msg.content.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;
    use chrono::{TimeZone, Utc};

    fn make_msg(content: &str) -> Message {
        Message::new(
            User::new("1", "alice", "Alice"),
            content,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    fn contents<'a>(messages: &[&'a Message]) -> Vec<&'a str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let messages = vec![make_msg("a"), make_msg(""), make_msg("c")];
        let filtered = filter_messages(&messages, &FilterSettings::new());
        assert_eq!(contents(&filtered), vec!["a", "", "c"]);
    }

    #[test]
    fn test_case_insensitive_filter() {
        let messages = vec![make_msg("Hello World"), make_msg("bye"), make_msg("HELLO")];
        let settings = FilterSettings::new().with_text("hello");
        let filtered = filter_messages(&messages, &settings);
        assert_eq!(contents(&filtered), vec!["Hello World", "HELLO"]);
    }

    #[test]
    fn test_case_sensitive_filter() {
        let messages = vec![make_msg("Hello World"), make_msg("hello")];
        let settings = FilterSettings::new().with_text("hello").with_case_sensitive(true);
        let filtered = filter_messages(&messages, &settings);
        assert_eq!(contents(&filtered), vec!["hello"]);
    }

    #[test]
    fn test_no_regex_interpretation() {
        let messages = vec![make_msg("a.c"), make_msg("abc"), make_msg("(x)")];
        let filtered = filter_messages(&messages, &FilterSettings::new().with_text("a.c"));
        assert_eq!(contents(&filtered), vec!["a.c"]);

        let filtered = filter_messages(&messages, &FilterSettings::new().with_text("(x"));
        assert_eq!(contents(&filtered), vec!["(x)"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let messages = vec![make_msg("cat 1"), make_msg("dog"), make_msg("cat 2"), make_msg("cat 3")];
        let filtered = filter_messages(&messages, &FilterSettings::new().with_text("cat"));
        assert_eq!(contents(&filtered), vec!["cat 1", "cat 2", "cat 3"]);
    }

    #[test]
    fn test_unicode_case_folding() {
        let messages = vec![make_msg("ПРИВЕТ мир"), make_msg("hello")];
        let filtered = filter_messages(&messages, &FilterSettings::new().with_text("привет"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_indices_match_filter_messages() {
        let messages = vec![make_msg("concatenate"), make_msg("dog"), make_msg("CAT")];
        let settings = FilterSettings::new().with_text("Cat");
        assert_eq!(filter_indices(&messages, &settings), vec![0, 2]);
        assert_eq!(filter_indices(&messages, &settings.clone().with_case_sensitive(true)), Vec::<usize>::new());
        assert_eq!(filter_indices(&messages, &FilterSettings::new()), vec![0, 1, 2]);
    }

    #[test]
    fn test_same_query_ignores_auto_apply() {
        let settings = FilterSettings::new().with_text("cat");
        assert!(settings.same_query(&settings.clone().with_auto_apply(true)));
        assert!(!settings.same_query(&settings.clone().with_case_sensitive(true)));
        assert!(!settings.same_query(&FilterSettings::new()));
    }

    #[test]
    fn test_defaults() {
        let settings = FilterSettings::default();
        assert!(settings.text_filter.is_empty());
        assert!(!settings.case_sensitive);
        assert!(!settings.auto_apply);
        assert!(!settings.is_active());
    }
}
