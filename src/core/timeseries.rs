//! Monthly message counts for bar charts.
//!
//! [`build_time_series`] produces one point per month between the first and
//! last message, inclusive, with a count per author. Months with no messages
//! still get a point. Within each month, authors below the share threshold
//! are folded into an `"Other"` series.
//!
//! [`build_monthly_totals`] is the single-series variant: one total per month.
//!
//! # Example
//!
//! ```
//! use chatstats::core::timeseries::build_time_series;
//! use chatstats::{Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! let alice = User::new("1", "alice", "Alice");
//! let messages = vec![
//!     Message::new(alice.clone(), "hi", Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()),
//!     Message::new(alice, "hi again", Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()),
//! ];
//!
//! let series = build_time_series(&messages, 0.05);
//! let months: Vec<_> = series.iter().map(|p| p.month.as_str()).collect();
//! assert_eq!(months, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
//! assert_eq!(series[1].total(), 0);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::month::{MonthId, month_id_of, month_name};
use crate::core::{OTHER_LABEL, share_below};

/// Per-author counts for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthBucket {
    pub month_id: MonthId,
    /// Author id to message count.
    pub per_author_counts: HashMap<String, u64>,
}

impl MonthBucket {
    /// Returns the number of messages in the month.
    pub fn total(&self) -> u64 {
        self.per_author_counts.values().sum()
    }
}

/// Messages grouped by month, keyed by month id.
#[derive(Debug, Clone, Default)]
pub struct MonthlyBuckets {
    buckets: BTreeMap<MonthId, MonthBucket>,
    usernames: HashMap<String, String>,
}

impl MonthlyBuckets {
    /// Counts every message into its month and author.
    pub fn collect<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        let mut grouped = Self::default();
        for msg in messages {
            let id = month_id_of(msg.timestamp);
            let bucket = grouped.buckets.entry(id).or_insert_with(|| MonthBucket {
                month_id: id,
                per_author_counts: HashMap::new(),
            });
            *bucket
                .per_author_counts
                .entry(msg.author.id.clone())
                .or_insert(0) += 1;
            grouped
                .usernames
                .entry(msg.author.id.clone())
                .or_insert_with(|| msg.author.username.clone());
        }
        grouped
    }

    /// Returns the first and last month seen, or `None` when empty.
    pub fn range(&self) -> Option<(MonthId, MonthId)> {
        let first = *self.buckets.keys().next()?;
        let last = *self.buckets.keys().next_back()?;
        Some((first, last))
    }

    /// Returns the bucket for a month, if any message fell in it.
    pub fn get(&self, id: MonthId) -> Option<&MonthBucket> {
        self.buckets.get(&id)
    }

    /// Returns the first-seen username for an author id.
    pub fn username(&self, author_id: &str) -> Option<&str> {
        self.usernames.get(author_id).map(String::as_str)
    }

    /// Returns the number of non-empty months.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if no message was counted.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Month ids from the first to the last month, gaps included.
    fn months(&self) -> impl Iterator<Item = MonthId> {
        let (start, end) = self.range().unwrap_or((1, 0));
        start..=end
    }
}

/// One stacked-bar point: a month and its per-series counts.
///
/// Serializes flat, e.g. `{"month": "Jan 2024", "alice": 3, "Other": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeriesPoint {
    pub month: String,
    /// Username (or `"Other"`) to count.
    #[serde(flatten)]
    pub values: BTreeMap<String, u64>,
}

impl ChartSeriesPoint {
    /// Returns the count for a series key.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    /// Returns the sum over all series in this month.
    pub fn total(&self) -> u64 {
        self.values.values().sum()
    }
}

/// One single-series bar: a month and its message total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub messages: u64,
}

/// Builds the stacked per-author series.
///
/// `threshold` is the share of a month's total below which an author is
/// folded into `"Other"`. Empty input yields an empty series.
pub fn build_time_series<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    threshold: f64,
) -> Vec<ChartSeriesPoint> {
    let grouped = MonthlyBuckets::collect(messages);
    series_from_buckets(&grouped, threshold)
}

/// Builds the stacked series from already grouped buckets.
pub fn series_from_buckets(grouped: &MonthlyBuckets, threshold: f64) -> Vec<ChartSeriesPoint> {
    grouped
        .months()
        .map(|id| {
            let mut values = BTreeMap::new();
            if let Some(bucket) = grouped.get(id) {
                let total = bucket.total();
                let mut other = 0;
                for (author_id, &count) in &bucket.per_author_counts {
                    if share_below(count, total, threshold) {
                        other += count;
                    } else {
                        let key = grouped.username(author_id).unwrap_or(author_id.as_str());
                        *values.entry(key.to_string()).or_insert(0) += count;
                    }
                }
                if other > 0 {
                    *values.entry(OTHER_LABEL.to_string()).or_insert(0) += other;
                }
            }
            ChartSeriesPoint {
                month: month_name(id),
                values,
            }
        })
        .collect()
}

/// Builds the per-month totals, gaps included.
pub fn build_monthly_totals<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Vec<MonthTotal> {
    let grouped = MonthlyBuckets::collect(messages);
    grouped
        .months()
        .map(|id| MonthTotal {
            month: month_name(id),
            messages: grouped.get(id).map_or(0, MonthBucket::total),
        })
        .collect()
}

/// Sums the totals of a monthly series.
pub fn total_messages(totals: &[MonthTotal]) -> u64 {
    totals.iter().map(|t| t.messages).sum()
}

/// Describes a monthly series, e.g. `"Jan 2024 - Mar 2024 (12 results)"`.
///
/// Returns `"No data"` for an empty series.
pub fn describe_range(totals: &[MonthTotal]) -> String {
    match (totals.first(), totals.last()) {
        (Some(first), Some(last)) => format!(
            "{} - {} ({} results)",
            first.month,
            last.month,
            total_messages(totals)
        ),
        _ => "No data".to_string(),
    }
}
