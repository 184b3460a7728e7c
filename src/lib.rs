//! # Chatstats
//!
//! A Rust library for turning a chat message export into activity
//! statistics and a searchable, highlighted message feed.
//!
//! ## Overview
//!
//! Given a list of [`Message`]s and a text filter, chatstats derives:
//! - **Monthly activity**: a per-author bar series with one point per month,
//!   gap months included, minor authors folded into `"Other"`
//! - **Author distribution**: whole-range share per author for a pie chart
//! - **Feed pages**: fixed-size pages with a sliding page-link strip
//! - **Render models**: highlighted, HTML-escaped message bodies with
//!   mention chips, clickable links and GIF embed detection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = load_messages("messages.json".as_ref())?;
//!     let settings = FilterSettings::new().with_text("lunch");
//!     let session = StatsSession::new(messages, settings, StatsConfig::new())?;
//!
//!     println!("{}", session.range_description());
//!     for slice in session.distribution() {
//!         println!("{}: {}", slice.label, slice.count);
//!     }
//!
//!     write_json(&session.report(), "report.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`session`]: [`StatsSession`](session::StatsSession), which keeps every view in sync
//! - [`core`]: Pure view builders
//!   - [`core::month`]: Month ids and names
//!   - [`core::filter`]: [`FilterSettings`](core::FilterSettings), [`filter_messages`](core::filter_messages)
//!   - [`core::highlight`]: Match segments
//!   - [`core::content`]: Embeds, mentions, links
//!   - [`core::timeseries`], [`core::distribution`], [`core::pagination`], [`core::colors`]
//!   - [`core::output`]: [`write_json`](core::output::write_json), [`write_csv`](core::output::write_csv)
//! - [`loader`] / [`parsing`]: Reading the JSON export
//! - [`report`]: Serializable snapshot of a session
//! - [`config`]: [`StatsConfig`](config::StatsConfig)
//! - [`format`]: Output format selection and text rendering
//! - [`cli`]: CLI types (feature `cli`)
//! - [`error`]: Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`]: Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod loader;
pub mod message;
pub mod parsing;
pub mod report;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::{Message, User};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::{Message, User};

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Configuration
    pub use crate::config::StatsConfig;

    // Loading
    pub use crate::loader::{load_messages, parse_messages};

    // Session and report
    pub use crate::report::Report;
    pub use crate::session::StatsSession;

    // View builders
    pub use crate::core::{
        ChartColor, ChartSeriesPoint, ColorRegistry, ContentClassifier, DistributionSlice,
        FilterSettings, Highlighter, MessageView, MonthTotal, PageWindow, Pagination,
        build_distribution, build_monthly_totals, build_time_series, filter_messages,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};

    pub use crate::format::OutputFormat;
}
