//! Report writers.
//!
//! This module provides writers for the derived views:
//! - [`write_csv`] / [`to_csv`] - Stacked monthly series with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - Full [`Report`](crate::report::Report) - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, plotting the bar chart |
//! | JSON | Everything: feed page, charts, legend |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::{to_csv, write_json};
//! use chatstats::config::StatsConfig;
//! use chatstats::core::FilterSettings;
//! use chatstats::session::StatsSession;
//!
//! let session = StatsSession::from_file(
//!     "export.json".as_ref(),
//!     FilterSettings::new(),
//!     StatsConfig::new(),
//! )?;
//!
//! write_json(&session.report(), "report.json")?;
//! let csv_string = to_csv(session.time_series())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
