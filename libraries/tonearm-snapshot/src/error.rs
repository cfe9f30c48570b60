/// Snapshot persistence errors
use std::path::PathBuf;
use thiserror::Error;
use tonearm_core::LibraryError;

/// Errors from loading or saving snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// No snapshot file exists at the given path
    #[error("no snapshot at '{0}'")]
    NotFound(PathBuf),

    /// Filesystem error
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decompressed payload is not a valid snapshot
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The atomic rename into place failed
    #[error("could not replace snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl From<SnapshotError> for LibraryError {
    fn from(err: SnapshotError) -> Self {
        LibraryError::snapshot(err.to_string())
    }
}

/// Snapshot result type
pub type Result<T> = std::result::Result<T, SnapshotError>;
