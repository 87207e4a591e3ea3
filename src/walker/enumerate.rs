//! Directory tree enumeration
//!
//! Breadth-first discovery of every directory under the scan root, so
//! the coordinator can dispatch exactly one unit of work per directory.
//! The root is always first in the result.

use crate::error::ScanError;
use crate::fs::{Filesystem, FsEntry};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerate every directory reachable from `root`, root first.
///
/// Only the root listing may fail the enumeration: without it there is
/// no batch to build. A deeper directory that cannot be listed stays in
/// the set (the collection phase will record a failure marker for it)
/// but its descendants are never discovered, so descent stops there.
pub fn enumerate_dirs(fs: &dyn Filesystem, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs = vec![root.to_path_buf()];
    let mut pending: VecDeque<PathBuf> = VecDeque::new();

    let entries = fs
        .list_dir(root)
        .map_err(|err| ScanError::from_list_dir(root, &err))?;
    collect_child_dirs(root, &entries, &mut dirs, &mut pending);

    while let Some(dir) = pending.pop_front() {
        match fs.list_dir(&dir) {
            Ok(entries) => collect_child_dirs(&dir, &entries, &mut dirs, &mut pending),
            Err(err) => {
                warn!(
                    path = %dir.display(),
                    error = %err,
                    "Cannot list directory, skipping subtree"
                );
            }
        }
    }

    debug!(dirs = dirs.len(), "Enumeration complete");
    Ok(dirs)
}

/// Push child directories of `parent` onto both the result set and the
/// descent queue. Symlinks to directories classify as symlinks and are
/// never descended into.
fn collect_child_dirs(
    parent: &Path,
    entries: &[FsEntry],
    dirs: &mut Vec<PathBuf>,
    pending: &mut VecDeque<PathBuf>,
) {
    for entry in entries {
        if entry.kind.is_dir() {
            let child = entry.path_under(parent);
            dirs.push(child.clone());
            pending.push_back(child);
        }
    }
}
