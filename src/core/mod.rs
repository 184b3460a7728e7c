//! Core statistics engine for chatstats.
//!
//! This module contains:
//! - [`month`] - Dense month ids and display names
//! - [`filter`] - Text filtering
//! - [`highlight`] - Match segments for search highlighting
//! - [`content`] - Per-message render models (embeds, mentions, links)
//! - [`timeseries`] - Monthly per-author series and monthly totals
//! - [`distribution`] - Whole-range per-author share
//! - [`pagination`] - Feed pages and page links
//! - [`colors`] - Stable chart colors per series key
//! - [`output`] - Report writers (CSV, JSON)
//!
//! Everything here is a pure function of its inputs; nothing returns an
//! error, and empty inputs give empty results.
//!
//! # Quick Start
//!
//! ```rust
//! use chatstats::core::{
//!     FilterSettings, build_distribution, build_time_series, filter_messages,
//! };
//! # let messages: Vec<chatstats::Message> = Vec::new();
//!
//! let settings = FilterSettings::new().with_text("hello");
//! let filtered = filter_messages(&messages, &settings);
//! let series = build_time_series(filtered.iter().copied(), 0.05);
//! let slices = build_distribution(filtered.iter().copied(), 0.05);
//! # assert!(series.is_empty() && slices.is_empty());
//! ```

pub mod colors;
pub mod content;
pub mod distribution;
pub mod filter;
pub mod highlight;
pub mod month;
pub mod output;
pub mod pagination;
pub mod timeseries;

// Re-export main types for convenience
pub use colors::{ChartColor, ColorRegistry};
pub use content::{ContentClassifier, MessageView};
pub use distribution::{DistributionSlice, build_distribution};
pub use filter::{FilterSettings, filter_indices, filter_messages};
pub use highlight::{HighlightSegment, Highlighter, SegmentKind, highlight};
pub use month::{MonthId, month_id, month_id_from_name, month_name};
pub use pagination::{PageWindow, Pagination};
pub use timeseries::{
    ChartSeriesPoint, MonthTotal, build_monthly_totals, build_time_series, describe_range,
    total_messages,
};

// Re-export Message from the crate root
pub use crate::Message;

/// Series key and pie label for folded authors.
pub const OTHER_LABEL: &str = "Other";

/// Returns `true` if `count` is strictly less than `threshold` of `total`.
pub(crate) fn share_below(count: u64, total: u64, threshold: f64) -> bool {
    total > 0 && (count as f64) / (total as f64) < threshold
}
