//! Whole-range message share per author, for pie charts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::{OTHER_LABEL, share_below};

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    /// `"@username"`, or `"Other"`.
    pub label: String,
    pub count: u64,
}

/// Counts messages per author over the whole input.
///
/// Authors whose share of the grand total is below `threshold` are folded
/// into a single `"Other"` slice, emitted last and only if nonzero. Named
/// slices are ordered by descending count, ties by first appearance.
///
/// ```
/// use chatstats::core::distribution::build_distribution;
/// use chatstats::{Message, User};
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let (a, b) = (User::new("1", "alice", "Alice"), User::new("2", "bob", "Bob"));
/// let mut messages: Vec<Message> = (0..98).map(|_| Message::new(a.clone(), "x", ts)).collect();
/// messages.extend((0..2).map(|_| Message::new(b.clone(), "y", ts)));
///
/// let slices = build_distribution(&messages, 0.05);
/// assert_eq!(slices.len(), 2);
/// assert_eq!((slices[0].label.as_str(), slices[0].count), ("@alice", 98));
/// assert_eq!((slices[1].label.as_str(), slices[1].count), ("Other", 2));
/// ```
pub fn build_distribution<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    threshold: f64,
) -> Vec<DistributionSlice> {
    // (username, count) in first-seen order
    let mut authors: Vec<(&'a str, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut total = 0u64;

    for msg in messages {
        let slot = *index.entry(msg.author.id.as_str()).or_insert_with(|| {
            authors.push((msg.author.username.as_str(), 0));
            authors.len() - 1
        });
        authors[slot].1 += 1;
        total += 1;
    }

    let mut other = 0;
    let mut slices: Vec<DistributionSlice> = Vec::with_capacity(authors.len() + 1);
    for (username, count) in authors {
        if share_below(count, total, threshold) {
            other += count;
        } else {
            slices.push(DistributionSlice {
                label: format!("@{username}"),
                count,
            });
        }
    }

    // Stable sort keeps first-seen order among equal counts
    slices.sort_by(|a, b| b.count.cmp(&a.count));

    if other > 0 {
        slices.push(DistributionSlice {
            label: OTHER_LABEL.to_string(),
            count: other,
        });
    }

    slices
}
