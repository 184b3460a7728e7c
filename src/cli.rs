//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! ```rust
//! use chatstats::cli::OutputFormat;
//!
//! let format = OutputFormat::Csv;
//! println!("Format: {}", format); // "CSV"
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Monthly activity, author share and a searchable feed for a chat export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats messages.json
    chatstats messages.json -q lunch -p 2
    chatstats messages.json -q Lunch --case-sensitive
    chatstats messages.json -f json -o report.json
    chatstats messages.json -f csv --config stats.json")]
pub struct Args {
    /// Path to the message export (JSON array)
    pub input: String,

    /// Only count messages containing this text
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Match the query case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Feed page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// JSON file with page size, Other threshold, gif hosts and palette size
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Full JSON report
    Json,

    /// Monthly series, semicolon delimited
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<crate::format::OutputFormat>().map(|format| match format {
            crate::format::OutputFormat::Json => OutputFormat::Json,
            crate::format::OutputFormat::Csv => OutputFormat::Csv,
            _ => OutputFormat::Text,
        })
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["chatstats", "export.json"]).unwrap();
        assert_eq!(args.input, "export.json");
        assert_eq!(args.page, 1);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.query.is_none());
        assert!(!args.case_sensitive);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_args_all_flags() {
        let args = Args::try_parse_from([
            "chatstats",
            "export.json",
            "-q",
            "lunch",
            "--case-sensitive",
            "-p",
            "3",
            "-f",
            "csv",
            "-o",
            "out.csv",
            "--config",
            "stats.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.query.as_deref(), Some("lunch"));
        assert!(args.case_sensitive);
        assert_eq!(args.page, 3);
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.output.as_deref(), Some("out.csv"));
        assert_eq!(args.config.as_deref(), Some("stats.json"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_args_rejects_unknown_format() {
        assert!(Args::try_parse_from(["chatstats", "x.json", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_format_conversions() {
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("jsonl".parse::<OutputFormat>().is_err());
        assert_eq!(
            crate::format::OutputFormat::from(OutputFormat::Csv),
            crate::format::OutputFormat::Csv
        );
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }
}
