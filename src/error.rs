//! Error types for dirstat
//!
//! This module defines the error hierarchy that covers:
//! - Filesystem scan errors (directory listing, size lookup)
//! - Configuration and CLI errors
//! - Worker thread errors
//! - Report artifact errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Keep the fatal/recoverable split explicit: only root-level failures
//!   abort the batch, everything else becomes a per-directory outcome
//! - Preserve error chains for debugging

use crate::fs::types::DirectoryStats;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Top-level error type for the dirstat application
#[derive(Error, Debug)]
pub enum DirstatError {
    /// Filesystem scan errors (fatal when they hit the scan root)
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Report artifact errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Interrupted by signal
    #[error("Scan interrupted by signal")]
    Interrupted,
}

/// Filesystem scan errors
///
/// Paths are carried as display strings so errors stay cheap to clone
/// and compare when they travel between worker threads as outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Path vanished between enumeration and collection
    #[error("Path not found: '{path}'")]
    NotFound { path: String },

    /// Listing or size lookup was refused
    #[error("Permission denied: '{path}'")]
    PermissionDenied { path: String },

    /// Directory listing failed for another reason
    #[error("Failed to read directory '{path}': {reason}")]
    ReadDirFailed { path: String, reason: String },

    /// Size lookup failed for another reason
    #[error("Failed to stat '{path}': {reason}")]
    StatFailed { path: String, reason: String },
}

impl ScanError {
    /// Classify a directory listing failure
    pub fn from_list_dir(path: &Path, err: &io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::ReadDirFailed {
                path,
                reason: err.to_string(),
            },
        }
    }

    /// Classify a size lookup failure
    pub fn from_stat(path: &Path, err: &io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::StatFailed {
                path,
                reason: err.to_string(),
            },
        }
    }

    /// Check if this error is expected on a live filesystem (entries
    /// vanishing mid-scan, restricted subtrees). Drives log levels only:
    /// recoverability is positional, every non-root failure is absorbed
    /// as a per-directory outcome.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            ScanError::NotFound { .. } | ScanError::PermissionDenied { .. }
        )
    }

    /// The path this error refers to
    pub fn path(&self) -> &str {
        match self {
            ScanError::NotFound { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirFailed { path, .. }
            | ScanError::StatFailed { path, .. } => path,
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid queue size
    #[error("Invalid queue size {size}: must be at least {min}")]
    InvalidQueueSize { size: usize, min: usize },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath {
        path: std::path::PathBuf,
        reason: String,
    },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Task queue send failed
    #[error("Failed to send task: queue closed")]
    QueueSendFailed,

    /// All workers died
    #[error("All workers have terminated unexpectedly")]
    AllWorkersDead,
}

/// Report artifact errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for DirstatError
pub type Result<T> = std::result::Result<T, DirstatError>;

/// Result type alias for ReportError
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// The outcome of collecting statistics for a single directory
///
/// A directory that cannot be listed yields `Failed`, never zero-valued
/// stats: consumers must be able to tell "empty" from "unreadable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Statistics were collected
    Success(DirectoryStats),

    /// The directory could not be processed
    Failed {
        path: std::path::PathBuf,
        error: ScanError,
    },
}

impl ScanOutcome {
    /// Returns true if this outcome carries statistics
    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Success(_))
    }

    /// Returns the path associated with this outcome
    pub fn path(&self) -> &Path {
        match self {
            ScanOutcome::Success(stats) => &stats.path,
            ScanOutcome::Failed { path, .. } => path,
        }
    }

    /// Returns the statistics if this outcome is successful
    pub fn stats(&self) -> Option<&DirectoryStats> {
        match self {
            ScanOutcome::Success(stats) => Some(stats),
            ScanOutcome::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_scan_error_classification() {
        let path = PathBuf::from("/data/locked");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ScanError::from_list_dir(&path, &denied);
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert!(err.is_expected());

        let vanished = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = ScanError::from_stat(&path, &vanished);
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert!(err.is_expected());

        let broken = io::Error::other("device error");
        let err = ScanError::from_list_dir(&path, &broken);
        assert!(matches!(err, ScanError::ReadDirFailed { .. }));
        assert!(!err.is_expected());
        assert_eq!(err.path(), "/data/locked");
    }

    #[test]
    fn test_error_conversion() {
        let scan_err = ScanError::NotFound {
            path: "/missing".into(),
        };
        let top: DirstatError = scan_err.into();
        assert!(matches!(top, DirstatError::Scan(_)));
    }

    #[test]
    fn test_outcome_accessors() {
        let stats = DirectoryStats::new(PathBuf::from("/data"));
        let ok = ScanOutcome::Success(stats);
        assert!(ok.is_success());
        assert_eq!(ok.path(), Path::new("/data"));
        assert!(ok.stats().is_some());

        let failed = ScanOutcome::Failed {
            path: PathBuf::from("/data/locked"),
            error: ScanError::PermissionDenied {
                path: "/data/locked".into(),
            },
        };
        assert!(!failed.is_success());
        assert_eq!(failed.path(), Path::new("/data/locked"));
        assert!(failed.stats().is_none());
    }
}
