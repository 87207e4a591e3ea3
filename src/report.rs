//! Report artifacts for scan results
//!
//! Writes the gathered outcomes as a CSV table or a JSON document.
//! The CSV keeps the classic spreadsheet layout: one row per readable
//! directory, raw byte totals plus megabyte columns for humans.
//! The JSON document adds scan metadata and the list of directories
//! that could not be read.

use crate::config::{OutputFormat, ScanConfig};
use crate::error::{ReportResult, ScanOutcome};
use crate::fs::DirectoryStats;
use crate::walker::ScanResult;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// CSV header row
const CSV_HEADERS: [&str; 7] = [
    "Folder",
    "Number of Files",
    "Total Size (bytes)",
    "Total Size (MB)",
    "Number of Subfolders",
    "Subfolder Size (bytes)",
    "Subfolder Size (MB)",
];

/// Convert raw bytes to megabytes
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// One CSV row for a directory record
fn csv_record(stats: &DirectoryStats) -> [String; 7] {
    [
        stats.path.display().to_string(),
        stats.file_count.to_string(),
        stats.folder_size.to_string(),
        format!("{:.2}", bytes_to_mb(stats.folder_size)),
        stats.subfolder_count.to_string(),
        stats.subfolder_size.to_string(),
        format!("{:.2}", bytes_to_mb(stats.subfolder_size)),
    ]
}

/// Write a CSV report, one row per successful directory.
///
/// Failed directories have no meaningful numbers, so they are left out
/// of the table rather than written as zero rows.
pub fn write_csv(path: &Path, outcomes: &[ScanOutcome]) -> ReportResult<u64> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;

    let mut rows = 0u64;
    for outcome in outcomes {
        if let ScanOutcome::Success(stats) = outcome {
            writer.write_record(csv_record(stats))?;
            rows += 1;
        }
    }
    writer.flush()?;

    Ok(rows)
}

/// JSON report document
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// Scan root
    root: String,

    /// RFC 3339 timestamp of report generation
    generated_at: String,

    /// Scan duration in seconds
    duration_secs: f64,

    /// Per-directory records in submission order
    directories: Vec<&'a DirectoryStats>,

    /// Directories that could not be read
    failures: Vec<JsonFailure>,
}

/// A failed directory in the JSON report
#[derive(Debug, Serialize)]
struct JsonFailure {
    path: String,
    error: String,
}

/// Write a pretty-printed JSON report with scan metadata
pub fn write_json(path: &Path, root: &Path, result: &ScanResult) -> ReportResult<u64> {
    let mut directories = Vec::new();
    let mut failures = Vec::new();

    for outcome in &result.outcomes {
        match outcome {
            ScanOutcome::Success(stats) => directories.push(stats),
            ScanOutcome::Failed { path, error } => failures.push(JsonFailure {
                path: path.display().to_string(),
                error: error.to_string(),
            }),
        }
    }

    let rows = directories.len() as u64;
    let report = JsonReport {
        root: root.display().to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        duration_secs: result.duration.as_secs_f64(),
        directories,
        failures,
    };

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)?;

    Ok(rows)
}

/// Write the report in the configured format, returning rows written
pub fn write_report(config: &ScanConfig, result: &ScanResult) -> ReportResult<u64> {
    let rows = match config.output_format {
        OutputFormat::Csv => write_csv(&config.output_path, &result.outcomes)?,
        OutputFormat::Json => write_json(&config.output_path, &config.root, result)?,
    };

    info!(
        path = %config.output_path.display(),
        rows = rows,
        "Report written"
    );

    Ok(rows)
}
