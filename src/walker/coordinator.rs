//! Scan coordinator - orchestrates the parallel statistics scan
//!
//! The coordinator is responsible for:
//! - Enumerating the directory tree
//! - Computing the root record inline (its failure is fatal)
//! - Dispatching one task per directory to the worker pool
//! - Gathering outcomes and restoring submission order
//! - Graceful shutdown on signal
//!
//! Dispatch uses a bounded queue with timed sends; results come back on
//! an unbounded channel so workers never block while the feeder waits
//! for queue space.

use crate::config::ScanConfig;
use crate::error::{DirstatError, Result, ScanOutcome, WorkerError};
use crate::fs::{Filesystem, LocalFilesystem};
use crate::walker::enumerate::enumerate_dirs;
use crate::walker::queue::{DirTask, RecvTimeoutError, TaskQueue};
use crate::walker::worker::{collect_directory_stats, ScanCounters, TaskResult, Worker};
use crossbeam_channel::{unbounded, SendTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed scan
///
/// `outcomes` holds one entry per enumerated directory in submission
/// order: the root record first, then non-root directories in the order
/// they were dispatched.
#[derive(Debug)]
pub struct ScanResult {
    /// Per-directory outcomes in submission order
    pub outcomes: Vec<ScanOutcome>,

    /// Total directories processed (successes and failures)
    pub total_dirs: u64,

    /// Total files counted directly inside processed directories
    pub total_files: u64,

    /// Total bytes of those files
    pub total_bytes: u64,

    /// Directories that produced a failure outcome
    pub failed_dirs: u64,

    /// Time taken for the scan
    pub duration: Duration,
}

/// Coordinates the parallel statistics scan
pub struct ScanCoordinator {
    /// Configuration
    config: Arc<ScanConfig>,

    /// Filesystem the scan reads through
    fs: Arc<dyn Filesystem>,

    /// Shutdown signal
    shutdown: Arc<AtomicBool>,

    /// Live counters shared with workers
    counters: Arc<ScanCounters>,
}

impl ScanCoordinator {
    /// Create a coordinator scanning the local filesystem
    pub fn new(config: ScanConfig) -> Self {
        Self::with_filesystem(config, Arc::new(LocalFilesystem))
    }

    /// Create a coordinator over an explicit filesystem implementation
    pub fn with_filesystem(config: ScanConfig, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            config: Arc::new(config),
            fs,
            shutdown: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(ScanCounters::default()),
        }
    }

    /// Get a clone of the shutdown flag (for signal handlers)
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Snapshot of the live counters for display
    pub fn progress(&self, elapsed: Duration) -> ScanProgress {
        ScanProgress {
            dirs: self.counters.dirs(),
            files: self.counters.files(),
            bytes: self.counters.bytes(),
            failures: self.counters.failures(),
            total_workers: self.config.worker_count,
            elapsed,
        }
    }

    /// Run the scan to completion
    pub fn run(&self) -> Result<ScanResult> {
        let start = Instant::now();

        info!(
            root = %self.config.root.display(),
            workers = self.config.worker_count,
            "Starting scan"
        );

        let dirs = enumerate_dirs(self.fs.as_ref(), &self.config.root)?;
        info!(dirs = dirs.len(), "Enumerated directory tree");

        // The root record never enters the pool: it is always first in
        // the batch and its failure is fatal, so it is computed inline
        // with the same collector the workers use.
        let root_stats = collect_directory_stats(self.fs.as_ref(), &self.config.root)?;
        self.counters.record_dir();
        self.counters.record_files(root_stats.file_count);
        self.counters.record_bytes(root_stats.folder_size);

        let task_count = dirs.len() - 1;

        let queue = TaskQueue::new(self.config.queue_size);
        let (result_tx, result_rx) = unbounded();

        let mut workers = Vec::with_capacity(self.config.worker_count);
        for id in 0..self.config.worker_count {
            workers.push(Worker::spawn(
                id,
                Arc::clone(&self.fs),
                queue.receiver(),
                result_tx.clone(),
                Arc::clone(&self.shutdown),
                Arc::clone(&self.counters),
            )?);
        }
        // Workers hold their own clones; the gather loop must see a
        // disconnect if every worker dies.
        drop(result_tx);
        debug!(count = workers.len(), "Workers spawned");

        // Dispatch one task per non-root directory, in enumeration order
        let sender = queue.sender();
        for (index, path) in dirs.iter().skip(1).cloned().enumerate() {
            let mut task = DirTask::new(index, path);
            loop {
                if self.shutdown.load(Ordering::Relaxed) {
                    info!("Shutdown signal received during dispatch");
                    return Err(DirstatError::Interrupted);
                }
                match sender.send_timeout(task, Duration::from_millis(100)) {
                    Ok(()) => break,
                    Err(SendTimeoutError::Timeout(returned)) => task = returned,
                    Err(SendTimeoutError::Disconnected(_)) => {
                        return Err(WorkerError::QueueSendFailed.into());
                    }
                }
            }
        }

        // Gather exactly one outcome per dispatched task
        let mut gathered: Vec<TaskResult> = Vec::with_capacity(task_count);
        while gathered.len() < task_count {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Shutdown signal received during gather");
                return Err(DirstatError::Interrupted);
            }
            match result_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(result) => gathered.push(result),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(WorkerError::AllWorkersDead.into());
                }
            }
        }

        // All tasks are answered; closing the queue lets workers exit
        drop(sender);
        drop(queue);
        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
            }
        }

        // Restore submission order: root record first, then dispatch order
        gathered.sort_unstable_by_key(|r| r.index);
        let mut outcomes = Vec::with_capacity(task_count + 1);
        outcomes.push(ScanOutcome::Success(root_stats));
        outcomes.extend(gathered.into_iter().map(|r| r.outcome));

        let duration = start.elapsed();
        info!(
            dirs = self.counters.dirs(),
            files = self.counters.files(),
            bytes = self.counters.bytes(),
            failures = self.counters.failures(),
            duration_secs = duration.as_secs(),
            "Scan completed"
        );

        Ok(ScanResult {
            outcomes,
            total_dirs: self.counters.dirs(),
            total_files: self.counters.files(),
            total_bytes: self.counters.bytes(),
            failed_dirs: self.counters.failures(),
            duration,
        })
    }

    /// Run the scan with a periodic progress callback
    pub fn run_with_progress<F>(&self, progress_callback: F) -> Result<ScanResult>
    where
        F: Fn(ScanProgress) + Send + 'static,
    {
        let start = Instant::now();
        let shutdown = Arc::clone(&self.shutdown);
        let counters = Arc::clone(&self.counters);
        let total_workers = self.config.worker_count;

        let progress_handle = thread::spawn(move || {
            while !shutdown.load(Ordering::Relaxed) {
                let progress = ScanProgress {
                    dirs: counters.dirs(),
                    files: counters.files(),
                    bytes: counters.bytes(),
                    failures: counters.failures(),
                    total_workers,
                    elapsed: start.elapsed(),
                };
                progress_callback(progress);
                thread::sleep(Duration::from_millis(100));
            }
        });

        let result = self.run();

        self.shutdown.store(true, Ordering::SeqCst);
        let _ = progress_handle.join();

        result
    }
}

/// Progress information for display
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Directories processed
    pub dirs: u64,

    /// Files counted
    pub files: u64,

    /// Bytes counted
    pub bytes: u64,

    /// Failed directories
    pub failures: u64,

    /// Total workers
    pub total_workers: usize,

    /// Elapsed time
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Calculate files per second rate
    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.files as f64 / secs
        } else {
            0.0
        }
    }

    /// Calculate dirs per second rate
    pub fn dirs_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.dirs as f64 / secs
        } else {
            0.0
        }
    }
}
