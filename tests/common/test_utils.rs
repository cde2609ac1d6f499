//! Test utilities for temporary files and dataset construction

use std::io::Write;

use chrono::{Duration, NaiveDate};
use tempfile::{Builder, NamedTempFile};
use tsanalysis::{Dataset, Timestamp, NA};

/// Write `contents` to a temporary file with the given extension
///
/// The file is deleted when the returned handle is dropped
pub fn write_temp_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("tsanalysis_test_")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Write a CSV file from a header line and rows
pub fn write_temp_csv(headers: &[&str], rows: &[Vec<String>]) -> NamedTempFile {
    let mut contents = headers.join(",");
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join(","));
        contents.push('\n');
    }
    write_temp_file(&contents, "csv")
}

/// Consecutive days starting at 2023-01-01
pub fn daily_timestamps(n: usize) -> Vec<Timestamp> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            (start + Duration::days(i as i64))
                .and_hms_opt(0, 0, 0)
                .unwrap()
        })
        .collect()
}

/// Wrap plain numbers as defined values
pub fn values(raw: &[f64]) -> Vec<NA<f64>> {
    raw.iter().map(|&v| NA::Value(v)).collect()
}

/// Single-column daily dataset
pub fn daily_dataset(column: &str, column_values: Vec<NA<f64>>) -> Dataset {
    let timestamps = daily_timestamps(column_values.len());
    Dataset::new(timestamps, vec![(column.to_string(), column_values)]).unwrap()
}
