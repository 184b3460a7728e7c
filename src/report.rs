//! Serializable snapshot of a session's views.
//!
//! A [`Report`] borrows from the [`StatsSession`](crate::session::StatsSession)
//! it was built from and is what the JSON writer emits.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Message;
use crate::core::colors::ChartColor;
use crate::core::content::MessageView;
use crate::core::distribution::DistributionSlice;
use crate::core::timeseries::{ChartSeriesPoint, MonthTotal};

/// All derived views at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub summary: Summary,
    pub time_series: &'a [ChartSeriesPoint],
    pub monthly_totals: &'a [MonthTotal],
    pub distribution: &'a [DistributionSlice],
    /// Series keys and pie labels with their chart colors, `@` stripped.
    pub legend: Vec<LegendEntry>,
    pub page: PageReport<'a>,
}

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_messages: usize,
    pub filtered_messages: usize,
    pub text_filter: String,
    pub case_sensitive: bool,
    /// See [`describe_range`](crate::core::describe_range).
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: String,
    pub color: ChartColor,
}

/// The current feed page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport<'a> {
    pub current_page: usize,
    pub last_page: usize,
    pub page_links: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    pub items: Vec<FeedItem<'a>>,
}

/// One rendered feed entry.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem<'a> {
    pub author: &'a str,
    pub display_name: &'a str,
    pub timestamp: DateTime<Utc>,
    pub content: &'a str,
    #[serde(flatten)]
    pub view: MessageView,
}

impl<'a> FeedItem<'a> {
    pub fn new(message: &'a Message, view: MessageView) -> Self {
        Self {
            author: &message.author.username,
            display_name: &message.author.display_name,
            timestamp: message.timestamp,
            content: &message.content,
            view,
        }
    }
}
