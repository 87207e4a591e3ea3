//! Worker thread logic for parallel statistics collection
//!
//! Each worker:
//! - Pulls directory tasks from the shared task queue
//! - Computes the per-directory statistics record independently
//! - Sends an indexed outcome back to the coordinator
//!
//! A failed directory never takes the worker down: the failure travels
//! back as an outcome and the loop moves to the next task.

use crate::error::{ScanError, ScanOutcome, WorkerError};
use crate::fs::{DirectoryStats, EntryKind, Filesystem};
use crate::walker::queue::{RecvTimeoutError, TaskReceiver};
use crossbeam_channel::Sender;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// An indexed result sent back to the coordinator
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Submission index of the task this result answers
    pub index: usize,

    /// What happened
    pub outcome: ScanOutcome,
}

/// Live counters shared by all workers, read by the progress reporter
#[derive(Debug, Default)]
pub struct ScanCounters {
    /// Directories processed (successes and failures)
    dirs_processed: AtomicU64,

    /// Files counted directly inside processed directories
    files_seen: AtomicU64,

    /// Bytes of those files
    bytes_seen: AtomicU64,

    /// Directories that produced a failure outcome
    failures: AtomicU64,
}

impl ScanCounters {
    pub fn record_dir(&self) {
        self.dirs_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_files(&self, count: u64) {
        self.files_seen.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_bytes(&self, bytes: u64) {
        self.bytes_seen.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dirs(&self) -> u64 {
        self.dirs_processed.load(Ordering::Relaxed)
    }

    pub fn files(&self) -> u64 {
        self.files_seen.load(Ordering::Relaxed)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes_seen.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Compute the statistics record for a single directory.
///
/// The rules are deliberately shallow:
/// - `file_count` and `folder_size` cover regular files directly in
///   `path`, sized without following symlinks
/// - every immediate child directory bumps `subfolder_count`, and its
///   own direct files (one level down, no deeper) add to
///   `subfolder_size`
/// - symlinks and special entries contribute to nothing
///
/// A file that vanishes between listing and sizing is skipped entirely.
/// A child directory that cannot be listed keeps its place in
/// `subfolder_count` but contributes zero bytes. Only a failure to list
/// `path` itself fails the whole record.
pub fn collect_directory_stats(
    fs: &dyn Filesystem,
    path: &Path,
) -> Result<DirectoryStats, ScanError> {
    let entries = fs
        .list_dir(path)
        .map_err(|err| ScanError::from_list_dir(path, &err))?;

    let mut stats = DirectoryStats::new(path.to_path_buf());

    for entry in &entries {
        match entry.kind {
            EntryKind::File => {
                let file_path = entry.path_under(path);
                match fs.file_size(&file_path) {
                    Ok(size) => stats.add_file(size),
                    Err(err) => {
                        trace!(
                            path = %file_path.display(),
                            error = %err,
                            "Skipping unreadable file entry"
                        );
                    }
                }
            }
            EntryKind::Directory => {
                // Counted even if its contents turn out to be unreadable
                stats.add_subfolder();

                let child = entry.path_under(path);
                match fs.list_dir(&child) {
                    Ok(children) => {
                        for grandchild in &children {
                            if !grandchild.kind.is_file() {
                                continue;
                            }
                            let file_path = grandchild.path_under(&child);
                            match fs.file_size(&file_path) {
                                Ok(size) => stats.add_subfolder_bytes(size),
                                Err(err) => {
                                    trace!(
                                        path = %file_path.display(),
                                        error = %err,
                                        "Skipping unreadable file entry"
                                    );
                                }
                            }
                        }
                    }
                    Err(err) => {
                        debug!(
                            path = %child.display(),
                            error = %err,
                            "Cannot size subfolder contents"
                        );
                    }
                }
            }
            EntryKind::Symlink | EntryKind::Other => {}
        }
    }

    Ok(stats)
}

/// A worker thread that processes directory tasks
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        fs: Arc<dyn Filesystem>,
        queue_rx: TaskReceiver,
        result_tx: Sender<TaskResult>,
        shutdown: Arc<AtomicBool>,
        counters: Arc<ScanCounters>,
    ) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("dirstat-{}", id))
            .spawn(move || {
                worker_loop(id, fs, queue_rx, result_tx, shutdown, counters);
            })
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| WorkerError::Panicked { id: self.id }),
            None => Ok(()),
        }
    }
}

/// Main worker loop
fn worker_loop(
    id: usize,
    fs: Arc<dyn Filesystem>,
    queue_rx: TaskReceiver,
    result_tx: Sender<TaskResult>,
    shutdown: Arc<AtomicBool>,
    counters: Arc<ScanCounters>,
) {
    debug!(worker = id, "Worker starting");

    loop {
        if shutdown.load(Ordering::Relaxed) {
            debug!(worker = id, "Shutdown requested, stopping");
            break;
        }

        // Timed receive so the shutdown flag is checked while idle
        let task = match queue_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(task) => task,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let outcome = match collect_directory_stats(fs.as_ref(), &task.path) {
            Ok(stats) => {
                counters.record_dir();
                counters.record_files(stats.file_count);
                counters.record_bytes(stats.folder_size);
                ScanOutcome::Success(stats)
            }
            Err(error) => {
                counters.record_dir();
                counters.record_failure();
                ScanOutcome::Failed {
                    path: task.path.clone(),
                    error,
                }
            }
        };

        match &outcome {
            ScanOutcome::Success(stats) => {
                trace!(
                    worker = id,
                    path = %task.path.display(),
                    files = stats.file_count,
                    "Directory processed"
                );
            }
            ScanOutcome::Failed { path, error } if error.is_expected() => {
                debug!(
                    worker = id,
                    path = %path.display(),
                    error = %error,
                    "Directory unreadable"
                );
            }
            ScanOutcome::Failed { path, error } => {
                warn!(
                    worker = id,
                    path = %path.display(),
                    error = %error,
                    "Directory failed"
                );
            }
        }

        let result = TaskResult {
            index: task.index,
            outcome,
        };
        if result_tx.send(result).is_err() {
            // Coordinator stopped gathering
            debug!(worker = id, "Result channel closed, stopping");
            break;
        }
    }

    debug!(
        worker = id,
        dirs = counters.dirs(),
        "Worker shutting down"
    );
}
