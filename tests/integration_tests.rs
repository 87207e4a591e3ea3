//! Integration tests for dirstat
//!
//! These run the full enumeration/collection pipeline against real
//! directory trees built with tempfile, plus the in-memory filesystem
//! for cases (permission denial) that are awkward to stage on disk.

use dirstat::config::{OutputFormat, ScanConfig};
use dirstat::error::{DirstatError, ScanError, ScanOutcome};
use dirstat::fs::{Filesystem, LocalFilesystem, MemoryFilesystem};
use dirstat::report;
use dirstat::walker::{collect_directory_stats, ScanCoordinator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

fn test_config(root: PathBuf, workers: usize) -> ScanConfig {
    ScanConfig {
        root,
        output_path: PathBuf::from("dirstat-report.csv"),
        output_format: OutputFormat::Csv,
        worker_count: workers,
        queue_size: 64,
        show_progress: false,
        verbose: false,
    }
}

/// Build a small tree with known sizes:
///
/// ```text
/// root/
///   top.bin        1000 bytes
///   alpha/
///     a1.bin        100 bytes
///     a2.bin        200 bytes
///     nested/
///       n1.bin       50 bytes
///   beta/
///     b1.bin         10 bytes
/// ```
fn build_tree(root: &Path) {
    std::fs::create_dir_all(root.join("alpha").join("nested")).unwrap();
    std::fs::create_dir_all(root.join("beta")).unwrap();
    std::fs::write(root.join("top.bin"), vec![0u8; 1000]).unwrap();
    std::fs::write(root.join("alpha").join("a1.bin"), vec![0u8; 100]).unwrap();
    std::fs::write(root.join("alpha").join("a2.bin"), vec![0u8; 200]).unwrap();
    std::fs::write(root.join("alpha").join("nested").join("n1.bin"), vec![0u8; 50]).unwrap();
    std::fs::write(root.join("beta").join("b1.bin"), vec![0u8; 10]).unwrap();
}

#[test]
fn test_collect_stats_on_real_tree() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    build_tree(&root);

    let fs = LocalFilesystem;

    // Direct files plus one level of subfolders, nothing deeper
    let stats = collect_directory_stats(&fs, &root).unwrap();
    assert_eq!(stats.file_count, 1);
    assert_eq!(stats.folder_size, 1000);
    assert_eq!(stats.subfolder_count, 2);
    assert_eq!(stats.subfolder_size, 310);

    let alpha = collect_directory_stats(&fs, &root.join("alpha")).unwrap();
    assert_eq!(alpha.file_count, 2);
    assert_eq!(alpha.folder_size, 300);
    assert_eq!(alpha.subfolder_count, 1);
    assert_eq!(alpha.subfolder_size, 50);
}

#[test]
fn test_full_scan_produces_ordered_records() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    build_tree(&root);

    let coordinator = ScanCoordinator::new(test_config(root.clone(), 4));
    let result = coordinator.run().unwrap();

    // Root first, then breadth-first in listing order
    let paths: Vec<PathBuf> = result
        .outcomes
        .iter()
        .map(|o| o.path().to_path_buf())
        .collect();
    assert_eq!(
        paths,
        vec![
            root.clone(),
            root.join("alpha"),
            root.join("beta"),
            root.join("alpha").join("nested"),
        ]
    );

    let root_stats = result.outcomes[0].stats().unwrap();
    assert_eq!(root_stats.file_count, 1);
    assert_eq!(root_stats.folder_size, 1000);
    assert_eq!(root_stats.subfolder_count, 2);
    assert_eq!(root_stats.subfolder_size, 310);

    assert_eq!(result.total_dirs, 4);
    assert_eq!(result.total_files, 5);
    assert_eq!(result.total_bytes, 1360);
    assert_eq!(result.failed_dirs, 0);
}

#[test]
fn test_scan_is_deterministic() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    build_tree(&root);

    let first = ScanCoordinator::new(test_config(root.clone(), 4))
        .run()
        .unwrap();
    let second = ScanCoordinator::new(test_config(root.clone(), 4))
        .run()
        .unwrap();

    assert_eq!(first.outcomes, second.outcomes);
}

#[test]
fn test_worker_count_does_not_change_results() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    build_tree(&root);

    let serial = ScanCoordinator::new(test_config(root.clone(), 1))
        .run()
        .unwrap();
    let parallel = ScanCoordinator::new(test_config(root.clone(), 8))
        .run()
        .unwrap();

    assert_eq!(serial.outcomes, parallel.outcomes);
    assert_eq!(serial.total_bytes, parallel.total_bytes);
}

#[test]
fn test_empty_root_yields_single_record() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let coordinator = ScanCoordinator::new(test_config(root.clone(), 2));
    let result = coordinator.run().unwrap();

    assert_eq!(result.outcomes.len(), 1);
    let stats = result.outcomes[0].stats().unwrap();
    assert_eq!(stats.path, root);
    assert!(stats.is_empty());
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("does-not-exist");

    let coordinator = ScanCoordinator::new(test_config(root, 2));
    let err = coordinator.run().unwrap_err();
    assert!(matches!(
        err,
        DirstatError::Scan(ScanError::NotFound { .. })
    ));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("scan");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("real.bin"), vec![0u8; 64]).unwrap();

    // Link targets live outside the scan root; following either one
    // would change the numbers
    let outside = dir.path().join("outside");
    std::fs::create_dir(&outside).unwrap();
    std::fs::write(outside.join("big.bin"), vec![0u8; 4096]).unwrap();
    std::os::unix::fs::symlink(&outside, root.join("link_dir")).unwrap();
    std::os::unix::fs::symlink(root.join("real.bin"), root.join("link_file")).unwrap();

    let coordinator = ScanCoordinator::new(test_config(root.clone(), 2));
    let result = coordinator.run().unwrap();

    assert_eq!(result.outcomes.len(), 1);
    let stats = result.outcomes[0].stats().unwrap();
    assert_eq!(stats.file_count, 1);
    assert_eq!(stats.folder_size, 64);
    assert_eq!(stats.subfolder_count, 0);
    assert_eq!(stats.subfolder_size, 0);
}

#[test]
fn test_denied_directory_becomes_failure_marker() {
    // Permission denial is staged in memory: tests may run as root,
    // where mode bits on a real directory would not refuse anything
    let fs: Arc<dyn Filesystem> = Arc::new(
        MemoryFilesystem::default()
            .with_file("/data/ok/a.bin", 10)
            .with_denied("/data/locked"),
    );

    let coordinator =
        ScanCoordinator::with_filesystem(test_config(PathBuf::from("/data"), 2), fs);
    let result = coordinator.run().unwrap();

    assert_eq!(result.total_dirs, 3);
    assert_eq!(result.failed_dirs, 1);

    let failed: Vec<&ScanOutcome> = result
        .outcomes
        .iter()
        .filter(|o| !o.is_success())
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path(), Path::new("/data/locked"));
}

#[test]
fn test_csv_report_roundtrip() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("scan");
    std::fs::create_dir(&root).unwrap();
    build_tree(&root);

    let result = ScanCoordinator::new(test_config(root.clone(), 2))
        .run()
        .unwrap();

    let csv_path = dir.path().join("report.csv");
    let rows = report::write_csv(&csv_path, &result.outcomes).unwrap();
    assert_eq!(rows, 4);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "Folder");
    assert_eq!(&headers[1], "Number of Files");
    assert_eq!(&headers[3], "Total Size (MB)");
    assert_eq!(&headers[6], "Subfolder Size (MB)");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 4);

    // First row is the scan root
    assert_eq!(records[0].get(0).unwrap(), root.display().to_string());
    assert_eq!(records[0].get(1).unwrap(), "1");
    assert_eq!(records[0].get(2).unwrap(), "1000");
}

#[test]
fn test_csv_report_skips_failed_directories() {
    let fs: Arc<dyn Filesystem> = Arc::new(
        MemoryFilesystem::default()
            .with_file("/data/ok/a.bin", 10)
            .with_denied("/data/locked"),
    );
    let result = ScanCoordinator::with_filesystem(test_config(PathBuf::from("/data"), 2), fs)
        .run()
        .unwrap();
    assert_eq!(result.outcomes.len(), 3);

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("report.csv");
    let rows = report::write_csv(&csv_path, &result.outcomes).unwrap();

    // The denied directory is not a zero row, it is absent
    assert_eq!(rows, 2);
}

#[test]
fn test_json_report_includes_failures() {
    let fs: Arc<dyn Filesystem> = Arc::new(
        MemoryFilesystem::default()
            .with_file("/data/ok/a.bin", 10)
            .with_denied("/data/locked"),
    );
    let result = ScanCoordinator::with_filesystem(test_config(PathBuf::from("/data"), 2), fs)
        .run()
        .unwrap();

    let dir = tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    report::write_json(&json_path, Path::new("/data"), &result).unwrap();

    let text = std::fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["root"], "/data");
    assert!(value["generated_at"].is_string());
    assert!(value["duration_secs"].is_number());

    let directories = value["directories"].as_array().unwrap();
    assert_eq!(directories.len(), 2);
    assert_eq!(directories[0]["path"], "/data");
    assert_eq!(directories[0]["subfolder_count"], 2);

    let failures = value["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["path"], "/data/locked");
}

#[test]
fn test_write_report_dispatches_on_format() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("scan");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("f.bin"), vec![0u8; 5]).unwrap();

    let result = ScanCoordinator::new(test_config(root.clone(), 1))
        .run()
        .unwrap();

    let mut config = test_config(root.clone(), 1);
    config.output_path = dir.path().join("out.json");
    config.output_format = OutputFormat::Json;
    report::write_report(&config, &result).unwrap();

    let text = std::fs::read_to_string(&config.output_path).unwrap();
    assert!(text.trim_start().starts_with('{'));
}
