//! Parallel per-directory statistics scan
//!
//! This module implements the dispatch/gather pipeline: enumerate the
//! tree, push one task per directory through a bounded queue to a pool
//! of workers, and reassemble the outcomes in submission order.
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │       ScanCoordinator        │
//!   │  - enumerate tree (BFS)      │
//!   │  - root record inline        │
//!   │  - dispatch + ordered gather │
//!   └──────────────┬───────────────┘
//!                  │ TaskQueue (bounded)
//!     ┌────────────┼────────────┐
//!     │            │            │
//! ┌───▼────┐   ┌───▼────┐   ┌───▼────┐
//! │Worker 1│   │Worker 2│   │Worker N│
//! │ stats  │   │ stats  │   │ stats  │
//! └───┬────┘   └───┬────┘   └───┬────┘
//!     │            │            │
//!     └────────────┼────────────┘
//!                  │ results (unbounded)
//!   ┌──────────────▼───────────────┐
//!   │     outcomes, root first     │
//!   └──────────────────────────────┘
//! ```

pub mod coordinator;
pub mod enumerate;
pub mod queue;
pub mod worker;

pub use coordinator::{ScanCoordinator, ScanProgress, ScanResult};
pub use enumerate::enumerate_dirs;
pub use queue::{DirTask, TaskQueue};
pub use worker::{collect_directory_stats, ScanCounters, TaskResult, Worker};
