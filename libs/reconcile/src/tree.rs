//! Generic directive-tree reconciliation.
//!
//! The tree functions as a key-value store keyed by sanitized path. Callers
//! compute the full expected map up front; this module diffs it against the
//! files on disk and performs the minimal set of filesystem operations.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::SyncError;

/// File name of every tree leaf.
pub const DIRECTIVE_FILE: &str = "Dockerfile";

/// Result of one reconciliation pass.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// Directive files created this pass.
    pub created: Vec<PathBuf>,
    /// Directive files removed this pass.
    pub removed: Vec<PathBuf>,
}

impl SyncOutcome {
    /// Whether the pass changed anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.created.is_empty() || !self.removed.is_empty()
    }
}

/// Lists every directive file under `root`, in path order.
///
/// A missing root is an empty tree, not an error.
pub fn list_directive_files(root: &Path) -> Result<BTreeSet<PathBuf>, SyncError> {
    let mut files = BTreeSet::new();
    if root.exists() {
        walk(root, &mut files)?;
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut BTreeSet<PathBuf>) -> Result<(), SyncError> {
    for entry in fs::read_dir(dir).map_err(SyncError::io(dir))? {
        let entry = entry.map_err(SyncError::io(dir))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if entry.file_name() == DIRECTIVE_FILE {
            files.insert(path);
        }
    }
    Ok(())
}

/// Converges the tree under `root` to exactly the `expected` map
/// (absolute directive path → file content).
///
/// Orphans are removed first, each removal followed by an upward prune of
/// now-empty directories stopping at `root`; missing entries are then
/// created. Entries already present are left untouched, whatever their
/// content: external actors advance tags and append digests in place, and
/// those edits must survive.
pub fn reconcile(
    root: &Path,
    expected: &BTreeMap<PathBuf, String>,
) -> Result<SyncOutcome, SyncError> {
    let existing = list_directive_files(root)?;
    let mut outcome = SyncOutcome::default();

    for path in existing.iter().filter(|path| !expected.contains_key(*path)) {
        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "removed orphan");
                outcome.removed.push(path.clone());
                if let Some(parent) = path.parent() {
                    prune_upward(parent, root);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "orphan vanished before removal, skipping");
            }
            Err(source) => {
                return Err(SyncError::Io {
                    path: path.clone(),
                    source,
                });
            }
        }
    }

    for (path, content) in expected {
        if existing.contains(path) {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SyncError::io(parent))?;
        }
        // An external writer may have produced the file since the listing;
        // never clobber it.
        if path.exists() {
            warn!(path = %path.display(), "entry appeared mid-pass, leaving as is");
            continue;
        }
        fs::write(path, content).map_err(SyncError::io(path))?;
        info!(path = %path.display(), "created entry");
        outcome.created.push(path.clone());
    }

    Ok(outcome)
}

/// Removes empty directories from `dir` upward, stopping at `root` or the
/// first non-empty directory.
fn prune_upward(dir: &Path, root: &Path) {
    let mut current = dir;
    while current != root && current.starts_with(root) {
        match fs::remove_dir(current) {
            Ok(()) => debug!(path = %current.display(), "removed empty directory"),
            // Not empty, already gone, or otherwise off-limits: stop here.
            Err(_) => break,
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
}
