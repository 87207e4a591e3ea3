//! dirstat - Concurrent Per-Directory Disk Usage Scanner
//!
//! A tool for collecting per-directory usage statistics across a
//! directory tree, outputting one record per directory to CSV or JSON
//! for capacity planning and cleanup work.
//!
//! # Features
//!
//! - **Non-Recursive Records**: Each directory row covers its direct
//!   files plus one level of subdirectories, so rows stay comparable
//!   regardless of tree depth.
//!
//! - **Parallel Collection**: Directories are enumerated up front and
//!   fanned out to a pool of worker threads over a bounded queue.
//!
//! - **Deterministic Output**: Results are reassembled in submission
//!   order, so two runs over the same tree produce identical reports
//!   whatever the worker count.
//!
//! - **Failure Isolation**: An unreadable directory becomes a failure
//!   marker in the result set; the scan carries on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Tree Enumeration                            │
//! │              (breadth-first, root listed first)                  │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ directory list
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            ┌──────────────────────────┐                         │
//! │            │     Task Queue           │                         │
//! │            │  (crossbeam bounded)     │                         │
//! │            │  - Backpressure support  │                         │
//! │            └──────────┬───────────────┘                         │
//! │                       │                                         │
//! │  ┌─────────┐  ┌───────┴─┐  ┌─────────┐         ┌─────────┐     │
//! │  │Worker 1 │  │Worker 2 │  │Worker 3 │  ...    │Worker N │     │
//! │  │  stat   │  │  stat   │  │  stat   │         │  stat   │     │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘     │
//! │       │            │            │                    │          │
//! │       └────────────┴─────┬──────┴────────────────────┘          │
//! │                          ▼                                      │
//! │            ┌──────────────────────────┐                         │
//! │            │     Result Gather        │                         │
//! │            │  - sorted by submission  │                         │
//! │            │  - root record first     │                         │
//! │            └──────────────────────────┘                         │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────┐
//!                    │   CSV / JSON     │
//!                    │     report       │
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Basic scan
//! dirstat /data
//!
//! # JSON report with 8 workers
//! dirstat /data -o usage.json -w 8
//!
//! # Quiet run for cron
//! dirstat /data -o usage.csv -q
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod progress;
pub mod report;
pub mod walker;

pub use config::{CliArgs, OutputFormat, ScanConfig};
pub use error::{DirstatError, Result, ScanError, ScanOutcome};
pub use fs::{DirectoryStats, Filesystem, LocalFilesystem, MemoryFilesystem};
pub use walker::{ScanCoordinator, ScanProgress, ScanResult};
