//! Configuration types for dirstat
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//! - Report format selection from the output path

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Minimum queue size
const MIN_QUEUE_SIZE: usize = 16;

/// Parallel per-directory disk usage scanner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirstat",
    version,
    about = "Parallel per-directory disk usage scanner with CSV/JSON reports",
    long_about = "Scans a directory tree and reports, for every directory, the number and\n\
                  total size of its direct files plus the count and one-level size of its\n\
                  immediate subdirectories.\n\n\
                  Every directory becomes one unit of work processed by a thread pool, so\n\
                  large trees scan in parallel while results keep a stable order.",
    after_help = "EXAMPLES:\n    \
        dirstat /data\n    \
        dirstat /data -o usage.csv\n    \
        dirstat /data -o usage.json -w 8\n    \
        dirstat /data --queue-size 512 -q"
)]
pub struct CliArgs {
    /// Root directory to scan
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Report file (.csv or .json decides the format)
    #[arg(short, long, default_value = "dirstat-report.csv", value_name = "FILE")]
    pub output: PathBuf,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Task queue size (controls dispatch memory usage)
    #[arg(long, default_value = "4096", value_name = "NUM")]
    pub queue_size: usize,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show skipped paths and debug detail)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Report format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values (.csv)
    Csv,
    /// Pretty-printed JSON (.json)
    Json,
}

impl CliArgs {
    /// Determine report format from the output file extension.
    /// Anything that is not `.json` writes CSV.
    pub fn output_format(&self) -> OutputFormat {
        match self.output.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

fn default_workers() -> usize {
    // One worker per core; the work units are stat-heavy but short
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// Report file path
    pub output_path: PathBuf,

    /// Report format (CSV or JSON)
    pub output_format: OutputFormat,

    /// Number of worker threads
    pub worker_count: usize,

    /// Task queue capacity
    pub queue_size: usize,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl ScanConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// The root itself is deliberately not checked here: a missing or
    /// unreadable root is a scan-time fatal error with its own message.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        if args.queue_size < MIN_QUEUE_SIZE {
            return Err(ConfigError::InvalidQueueSize {
                size: args.queue_size,
                min: MIN_QUEUE_SIZE,
            });
        }

        if let Some(parent) = args.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidOutputPath {
                    path: args.output.clone(),
                    reason: format!("Parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        let output_format = args.output_format();

        Ok(Self {
            root: args.root,
            output_path: args.output,
            output_format,
            worker_count: args.workers,
            queue_size: args.queue_size,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["dirstat", "/data"]);
        assert_eq!(args.root, PathBuf::from("/data"));
        assert_eq!(args.output, PathBuf::from("dirstat-report.csv"));
        assert!(args.workers >= 1);
        assert!(!args.quiet);
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(
            parse(&["dirstat", "/data", "-o", "out.json"]).output_format(),
            OutputFormat::Json
        );
        assert_eq!(
            parse(&["dirstat", "/data", "-o", "out.JSON"]).output_format(),
            OutputFormat::Json
        );
        assert_eq!(
            parse(&["dirstat", "/data", "-o", "out.csv"]).output_format(),
            OutputFormat::Csv
        );
        assert_eq!(
            parse(&["dirstat", "/data", "-o", "report"]).output_format(),
            OutputFormat::Csv
        );
    }

    #[test]
    fn test_worker_count_validation() {
        let args = parse(&["dirstat", "/data", "-w", "0"]);
        assert!(matches!(
            ScanConfig::from_args(args),
            Err(ConfigError::InvalidWorkerCount { .. })
        ));

        let args = parse(&["dirstat", "/data", "-w", "100000"]);
        assert!(matches!(
            ScanConfig::from_args(args),
            Err(ConfigError::InvalidWorkerCount { .. })
        ));

        let args = parse(&["dirstat", "/data", "-w", "4"]);
        let config = ScanConfig::from_args(args).unwrap();
        assert_eq!(config.worker_count, 4);
    }

    #[test]
    fn test_queue_size_validation() {
        let args = parse(&["dirstat", "/data", "--queue-size", "1"]);
        assert!(matches!(
            ScanConfig::from_args(args),
            Err(ConfigError::InvalidQueueSize { .. })
        ));
    }

    #[test]
    fn test_output_parent_must_exist() {
        let args = parse(&["dirstat", "/data", "-o", "/no/such/dir/report.csv"]);
        assert!(matches!(
            ScanConfig::from_args(args),
            Err(ConfigError::InvalidOutputPath { .. })
        ));
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = parse(&["dirstat", "/data", "-q"]);
        let config = ScanConfig::from_args(args).unwrap();
        assert!(!config.show_progress);
    }
}
