//! In-memory filesystem fixture
//!
//! Models the failure modes a live tree can throw at the scanner
//! without needing privilege tricks on a real disk: restricted
//! directories, files that vanish between listing and size lookup,
//! symlinks. Listing order matches `LocalFilesystem` (sorted by name)
//! so the same assertions hold against either backend.

use super::{EntryKind, Filesystem, FsEntry};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// A fixed in-memory tree implementing [`Filesystem`]
///
/// Built by chaining: each `with_*` call registers the path and any
/// missing ancestor directories.
///
/// ```
/// use dirstat::fs::{Filesystem, MemoryFilesystem};
/// use std::path::Path;
///
/// let fs = MemoryFilesystem::new()
///     .with_file("/data/a.txt", 100)
///     .with_denied("/data/locked");
///
/// assert!(fs.list_dir(Path::new("/data")).is_ok());
/// assert!(fs.list_dir(Path::new("/data/locked")).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryFilesystem {
    /// Directory path to its entries, sorted by name
    dirs: BTreeMap<PathBuf, BTreeMap<OsString, EntryKind>>,

    /// File path to its size; a listed file missing here vanished
    sizes: HashMap<PathBuf, u64>,

    /// Paths whose listing or size lookup is refused
    denied: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty directory
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.register_dir(path.as_ref());
        self
    }

    /// Register a file with the given size
    pub fn with_file(mut self, path: impl AsRef<Path>, size: u64) -> Self {
        let path = path.as_ref();
        self.register_entry(path, EntryKind::File);
        self.sizes.insert(path.to_path_buf(), size);
        self
    }

    /// Register a file that appears in its parent's listing but fails
    /// size lookup with not-found, as if deleted mid-scan
    pub fn with_vanishing_file(mut self, path: impl AsRef<Path>) -> Self {
        self.register_entry(path.as_ref(), EntryKind::File);
        self
    }

    /// Register a symbolic link
    pub fn with_symlink(mut self, path: impl AsRef<Path>) -> Self {
        self.register_entry(path.as_ref(), EntryKind::Symlink);
        self
    }

    /// Register an entry that is neither file, directory nor symlink
    pub fn with_other(mut self, path: impl AsRef<Path>) -> Self {
        self.register_entry(path.as_ref(), EntryKind::Other);
        self
    }

    /// Register a directory that refuses to be listed
    pub fn with_denied(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.register_dir(path);
        self.denied.insert(path.to_path_buf());
        self
    }

    fn register_dir(&mut self, path: &Path) {
        self.dirs.entry(path.to_path_buf()).or_default();
        let mut current = path.to_path_buf();
        while let (Some(parent), Some(name)) = (
            current.parent().map(Path::to_path_buf),
            current.file_name().map(OsString::from),
        ) {
            self.dirs
                .entry(parent.clone())
                .or_default()
                .insert(name, EntryKind::Directory);
            current = parent;
        }
    }

    fn register_entry(&mut self, path: &Path, kind: EntryKind) {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.register_dir(parent);
            if let Some(entries) = self.dirs.get_mut(parent) {
                entries.insert(name.to_os_string(), kind);
            }
        }
    }

    fn denied_error(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("permission denied: {}", path.display()),
        )
    }

    fn not_found_error(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such path: {}", path.display()),
        )
    }
}

impl Filesystem for MemoryFilesystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        if self.denied.contains(path) {
            return Err(Self::denied_error(path));
        }
        match self.dirs.get(path) {
            Some(entries) => Ok(entries
                .iter()
                .map(|(name, kind)| FsEntry::new(name.clone(), *kind))
                .collect()),
            None => Err(Self::not_found_error(path)),
        }
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        if self.denied.contains(path) {
            return Err(Self::denied_error(path));
        }
        match self.sizes.get(path) {
            Some(size) => Ok(*size),
            None => Err(Self::not_found_error(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_sorted() {
        let fs = MemoryFilesystem::new()
            .with_file("/data/zebra.txt", 1)
            .with_file("/data/alpha.txt", 2)
            .with_dir("/data/middle");

        let entries = fs.list_dir(Path::new("/data")).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|e| e.name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.txt", "middle", "zebra.txt"]);
    }

    #[test]
    fn test_ancestors_are_registered() {
        let fs = MemoryFilesystem::new().with_file("/a/b/c/leaf.txt", 7);

        let entries = fs.list_dir(Path::new("/a")).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].kind.is_dir());

        let entries = fs.list_dir(Path::new("/a/b/c")).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].kind.is_file());
        assert_eq!(fs.file_size(Path::new("/a/b/c/leaf.txt")).unwrap(), 7);
    }

    #[test]
    fn test_denied_directory() {
        let fs = MemoryFilesystem::new()
            .with_denied("/data/locked")
            .with_file("/data/open.txt", 1);

        // Still visible as a child of its parent
        let entries = fs.list_dir(Path::new("/data")).unwrap();
        assert_eq!(entries.len(), 2);

        let err = fs.list_dir(Path::new("/data/locked")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_vanishing_file() {
        let fs = MemoryFilesystem::new().with_vanishing_file("/data/ghost.txt");

        let entries = fs.list_dir(Path::new("/data")).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].kind.is_file());

        let err = fs.file_size(Path::new("/data/ghost.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_path() {
        let fs = MemoryFilesystem::new().with_dir("/data");
        let err = fs.list_dir(Path::new("/elsewhere")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
