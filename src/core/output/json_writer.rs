//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::Report;

/// Writes the report to a pretty-printed JSON file.
///
/// # Format
/// ```json
/// {
///   "summary": {"total_messages": 3, "filtered_messages": 3, ...},
///   "time_series": [{"month": "Jan 2024", "alice": 3}],
///   "monthly_totals": [{"month": "Jan 2024", "messages": 3}],
///   "distribution": [{"label": "@alice", "count": 3}],
///   "legend": [{"key": "alice", "color": "var(--chart-1)"}],
///   "page": {"current_page": 1, "items": [...], ...}
/// }
/// ```
pub fn write_json(report: &Report<'_>, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the report to a JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(report: &Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
