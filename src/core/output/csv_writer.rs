//! CSV writer for the stacked monthly series.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::timeseries::ChartSeriesPoint;
use crate::error::Result;

/// Writes the series to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Month`, then every series key in first-seen order
/// - Missing counts are written as `0`
/// - Encoding: UTF-8
pub fn write_csv(points: &[ChartSeriesPoint], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(points, file)
}

/// Converts the series to a CSV string.
pub fn to_csv(points: &[ChartSeriesPoint]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(points, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(points: &[ChartSeriesPoint], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    let keys = series_keys(points);
    let mut header = vec!["Month"];
    header.extend(keys.iter().copied());
    writer.write_record(&header)?;

    for point in points {
        let mut record = vec![point.month.clone()];
        record.extend(keys.iter().map(|k| point.get(k).unwrap_or(0).to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Union of series keys, first-seen across months.
fn series_keys(points: &[ChartSeriesPoint]) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for point in points {
        for key in point.values.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
    }
    keys
}
