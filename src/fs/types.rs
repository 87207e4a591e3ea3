//! Filesystem entry types and data structures
//!
//! These types represent directory entries returned from listing
//! operations and the per-directory statistics record the scan produces.

use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (never followed)
    Symlink,
    /// Anything else (devices, pipes, sockets)
    Other,
}

impl EntryKind {
    /// Classify from a `std::fs::FileType` as returned by `read_dir`.
    ///
    /// `read_dir` does not follow symlinks, so a link to a directory
    /// classifies as `Symlink` here and contributes to nothing.
    pub fn from_file_type(file_type: &std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Check if this is a regular file
    pub fn is_file(&self) -> bool {
        *self == EntryKind::File
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }

    /// Check if this is a symbolic link
    pub fn is_symlink(&self) -> bool {
        *self == EntryKind::Symlink
    }

    /// Human-readable label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
            EntryKind::Other => "other",
        }
    }
}

/// A directory entry returned from listing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    /// Entry name (not full path)
    pub name: OsString,

    /// Entry type, classified without following symlinks
    pub kind: EntryKind,
}

impl FsEntry {
    /// Create a new entry
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Full path of this entry under `parent`
    pub fn path_under(&self, parent: &Path) -> PathBuf {
        parent.join(&self.name)
    }
}

/// Statistics collected for a single directory
///
/// The numbers are deliberately shallow: `file_count` and `folder_size`
/// cover entries directly inside the directory, and the subfolder pair
/// looks exactly one level into immediate child directories. Nothing
/// here is a recursive subtree total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    /// Path of the directory this record describes
    pub path: PathBuf,

    /// Number of regular files directly in this directory
    pub file_count: u64,

    /// Total size in bytes of files directly in this directory
    pub folder_size: u64,

    /// Number of immediate child directories
    pub subfolder_count: u64,

    /// Total size in bytes of files directly inside immediate child
    /// directories (one level down, no deeper)
    pub subfolder_size: u64,
}

impl DirectoryStats {
    /// Create a zeroed record for `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_count: 0,
            folder_size: 0,
            subfolder_count: 0,
            subfolder_size: 0,
        }
    }

    /// Record a file directly in this directory
    pub fn add_file(&mut self, size: u64) {
        self.file_count += 1;
        self.folder_size += size;
    }

    /// Record an immediate child directory
    pub fn add_subfolder(&mut self) {
        self.subfolder_count += 1;
    }

    /// Record bytes from a file one level down
    pub fn add_subfolder_bytes(&mut self, size: u64) {
        self.subfolder_size += size;
    }

    /// Check if the directory held nothing countable
    pub fn is_empty(&self) -> bool {
        self.file_count == 0 && self.subfolder_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_labels() {
        assert!(EntryKind::File.is_file());
        assert!(EntryKind::Directory.is_dir());
        assert!(EntryKind::Symlink.is_symlink());
        assert!(!EntryKind::Other.is_file());
        assert_eq!(EntryKind::Directory.as_str(), "directory");
    }

    #[test]
    fn test_entry_path_under() {
        let entry = FsEntry::new("notes.txt", EntryKind::File);
        assert_eq!(
            entry.path_under(Path::new("/data")),
            PathBuf::from("/data/notes.txt")
        );
    }

    #[test]
    fn test_directory_stats_accumulation() {
        let mut stats = DirectoryStats::new(PathBuf::from("/data"));
        assert!(stats.is_empty());

        stats.add_file(1024);
        stats.add_file(512);
        stats.add_subfolder();
        stats.add_subfolder_bytes(2048);

        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.folder_size, 1536);
        assert_eq!(stats.subfolder_count, 1);
        assert_eq!(stats.subfolder_size, 2048);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_empty_stats_differ_by_path_only() {
        let a = DirectoryStats::new(PathBuf::from("/a"));
        let b = DirectoryStats::new(PathBuf::from("/a"));
        assert_eq!(a, b);
    }
}
