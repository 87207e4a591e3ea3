//! Bounded task queue for directory units of work
//!
//! The coordinator feeds one task per directory; workers pull from
//! the shared channel. The bound keeps dispatch memory flat on huge
//! trees, and the feeder uses timed sends so an interrupt can never
//! wedge it against a full queue.

use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use crossbeam_channel::RecvTimeoutError;

/// A task to collect statistics for one directory
#[derive(Debug, Clone)]
pub struct DirTask {
    /// Position in submission order, used to reassemble results
    pub index: usize,

    /// Full path to the directory
    pub path: PathBuf,
}

impl DirTask {
    /// Create a new directory task
    pub fn new(index: usize, path: PathBuf) -> Self {
        Self { index, path }
    }
}

/// Statistics for the task queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total tasks enqueued
    pub enqueued: AtomicU64,

    /// Total tasks dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Tasks handed out to workers so far
    pub fn throughput(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Bounded queue of directory tasks
pub struct TaskQueue {
    /// Sender for adding tasks
    sender: Sender<DirTask>,

    /// Receiver for getting tasks
    receiver: Receiver<DirTask>,

    /// Queue capacity
    capacity: usize,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl TaskQueue {
    /// Create a new task queue with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);

        Self {
            sender,
            receiver,
            capacity,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a sender handle for feeding tasks
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get a receiver handle (clone one per worker)
    pub fn receiver(&self) -> TaskReceiver {
        TaskReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Get queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Handle for sending tasks to the queue
#[derive(Clone)]
pub struct TaskSender {
    sender: Sender<DirTask>,
    stats: Arc<QueueStats>,
}

impl TaskSender {
    /// Try to send a task without blocking
    ///
    /// Returns `Ok(true)` if sent, `Ok(false)` if the queue is full,
    /// `Err` if the queue is disconnected.
    pub fn try_send(&self, task: DirTask) -> Result<bool, ()> {
        match self.sender.try_send(task) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(true)
            }
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => Err(()),
        }
    }

    /// Send a task, blocking at most `timeout`
    ///
    /// On timeout the task is handed back so the caller can check for
    /// shutdown and retry.
    pub fn send_timeout(
        &self,
        task: DirTask,
        timeout: Duration,
    ) -> Result<(), SendTimeoutError<DirTask>> {
        self.sender.send_timeout(task, timeout)?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Handle for receiving tasks from the queue
#[derive(Clone)]
pub struct TaskReceiver {
    receiver: Receiver<DirTask>,
    stats: Arc<QueueStats>,
}

impl TaskReceiver {
    /// Try to receive a task without blocking
    pub fn try_recv(&self) -> Option<DirTask> {
        match self.receiver.try_recv() {
            Ok(task) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(task)
            }
            Err(_) => None,
        }
    }

    /// Receive with timeout
    ///
    /// Timeout and disconnect are distinct: workers keep polling on
    /// timeout but exit once the queue is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DirTask, RecvTimeoutError> {
        let task = self.receiver.recv_timeout(timeout)?;
        self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
        Ok(task)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}
