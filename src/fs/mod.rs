//! Filesystem access module
//!
//! Everything the scanner learns about a tree flows through the
//! [`Filesystem`] trait, which keeps the statistics logic independent of
//! the host filesystem. Production code uses [`LocalFilesystem`] backed
//! by `std::fs`; tests use [`MemoryFilesystem`] to model access denials
//! and mid-scan deletions deterministically.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Filesystem                  │
//! │  - list_dir: entries with name + kind        │
//! │  - file_size: size without following links   │
//! └──────────────────────────────────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌──────────────────┐   ┌─────────────────────┐
//! │ LocalFilesystem  │   │  MemoryFilesystem   │
//! │  std::fs backed  │   │  in-memory fixture  │
//! └──────────────────┘   └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use dirstat::fs::{EntryKind, Filesystem, MemoryFilesystem};
//! use std::path::Path;
//!
//! let fs = MemoryFilesystem::new()
//!     .with_file("/data/a.txt", 100)
//!     .with_dir("/data/logs");
//!
//! let entries = fs.list_dir(Path::new("/data")).unwrap();
//! assert_eq!(entries.len(), 2);
//! assert!(entries.iter().any(|e| e.kind == EntryKind::Directory));
//! ```

pub mod memory;
pub mod types;

pub use memory::MemoryFilesystem;
pub use types::{DirectoryStats, EntryKind, FsEntry};

use std::io;
use std::path::Path;
use tracing::debug;

/// Read-only view of a filesystem, as much of it as the scanner needs.
///
/// Implementations never follow symbolic links: entries classify by
/// their own type and a link's size is the link itself, not its target.
pub trait Filesystem: Send + Sync {
    /// List the entries of a directory, sorted by name
    fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    /// Size in bytes of the file at `path`
    fn file_size(&self, path: &Path) -> io::Result<u64>;
}

/// Filesystem implementation backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            match entry.file_type() {
                Ok(file_type) => entries.push(FsEntry {
                    name: entry.file_name(),
                    kind: EntryKind::from_file_type(&file_type),
                }),
                Err(err) => {
                    // Entry vanished between readdir and type lookup
                    debug!(
                        path = %entry.path().display(),
                        error = %err,
                        "Cannot determine entry type, skipping"
                    );
                }
            }
        }
        // Host readdir order is arbitrary; sorting keeps report rows
        // and dispatch order reproducible between runs.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        // symlink_metadata so a dangling link never drags in its target
        std::fs::symlink_metadata(path).map(|meta| meta.len())
    }
}
