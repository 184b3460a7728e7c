//! Output format types for the chatstats library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks, plus the plain-text report rendering.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatstats::Result<()> {
//! use chatstats::config::StatsConfig;
//! use chatstats::core::FilterSettings;
//! use chatstats::format::{OutputFormat, to_format_string};
//! use chatstats::session::StatsSession;
//!
//! let session = StatsSession::new(Vec::new(), FilterSettings::new(), StatsConfig::new())?;
//!
//! let text = to_format_string(&session, OutputFormat::Text)?;
//! assert!(text.contains("No data"));
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("report.json")?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok(())
//! # }
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;
use crate::report::Report;
use crate::session::StatsSession;

/// Output format for reports.
///
/// - [`Text`](OutputFormat::Text) - Human-readable summary
/// - [`Json`](OutputFormat::Json) - Full report with feed page and legend
/// - [`Csv`](OutputFormat::Csv) - Stacked monthly series, semicolon delimited
///
/// # Example
///
/// ```rust
/// use chatstats::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("csv").unwrap();
/// assert_eq!(format, OutputFormat::Csv);
/// assert_eq!(format.extension(), "csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Plain-text summary (default)
    #[default]
    Text,

    /// Pretty-printed JSON report
    Json,

    /// CSV of the monthly series
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatstats::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.TXT").unwrap(), OutputFormat::Text);
    /// assert!(OutputFormat::from_path("out.xml").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, ChatstatsError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatstatsError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: txt, json, csv",
                    ext
                ),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the session's views to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_to_format(
    session: &StatsSession,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), ChatstatsError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(session.time_series(), path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(&session.report(), path),
        OutputFormat::Text => {
            let mut file = File::create(path)?;
            file.write_all(render_text(&session.report()).as_bytes())?;
            Ok(())
        }
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts the session's views to a string in the specified format.
pub fn to_format_string(
    session: &StatsSession,
    format: OutputFormat,
) -> Result<String, ChatstatsError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(session.time_series()),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(&session.report()),
        OutputFormat::Text => Ok(render_text(&session.report())),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

fn missing_feature(format: OutputFormat) -> ChatstatsError {
    ChatstatsError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            match format {
                OutputFormat::Csv => "csv-output",
                _ => "json-output",
            }
        ),
    )
}

/// Renders a report as plain text.
///
/// Sections: range and counts, monthly totals, distribution with shares,
/// then the current feed page with one line per message.
pub fn render_text(report: &Report<'_>) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Range:     {}", summary.range);
    let _ = writeln!(out, "Messages:  {}", summary.total_messages);
    if !summary.text_filter.is_empty() {
        let _ = writeln!(
            out,
            "Matching:  {} (filter \"{}\"{})",
            summary.filtered_messages,
            summary.text_filter,
            if summary.case_sensitive { ", case-sensitive" } else { "" }
        );
    }

    if !report.monthly_totals.is_empty() {
        let _ = writeln!(out, "\nMonthly activity:");
        for total in report.monthly_totals {
            let _ = writeln!(out, "   {:<10} {:>6}", total.month, total.messages);
        }
    }

    if !report.distribution.is_empty() {
        let grand: u64 = report.distribution.iter().map(|s| s.count).sum();
        let _ = writeln!(out, "\nDistribution:");
        for slice in report.distribution {
            let share = slice.count as f64 * 100.0 / grand as f64;
            let _ = writeln!(out, "   {:<20} {:>6}  ({:.1}%)", slice.label, slice.count, share);
        }
    }

    let page = &report.page;
    if page.last_page > 0 {
        let links: Vec<String> = page
            .page_links
            .iter()
            .map(|&p| {
                if p == page.current_page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "\nPage {}/{}  {}",
            page.current_page,
            page.last_page,
            links.join(" ")
        );
        for item in &page.items {
            let body = if item.view.is_embed {
                format!("[embed] {}", item.view.embed_url.as_deref().unwrap_or(item.content))
            } else {
                item.content.replace('\n', " ")
            };
            let _ = writeln!(
                out,
                "   {}  @{}: {}",
                item.timestamp.format("%Y-%m-%d %H:%M"),
                item.author,
                body
            );
        }
    }

    out
}
