//! Error types for tree reconciliation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reconciling or walking a tree.
///
/// Expected conditions (FROM-less files, entries racing with an external
/// writer) are not errors; they are skipped with a log line. This type
/// covers hard filesystem failures only.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Wraps an I/O error with the path it occurred at.
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> SyncError + '_ {
        move |source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
