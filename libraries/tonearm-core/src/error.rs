/// Core error types for Tonearm
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Core error type for the snapshot pipeline
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The configured library root does not exist or is not a directory
    #[error("Library root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// Tag/media probing errors
    #[error("Probe error: {0}")]
    Probe(String),

    /// Snapshot persistence errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// More than one in-flight upload recorded for a single channel.
    /// The upload layer must never let this happen.
    #[error("Upload state damaged: {0}")]
    UploadStateDamaged(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl LibraryError {
    /// Create a probe error
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Create a snapshot error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Create an upload-state error
    pub fn upload_state(msg: impl Into<String>) -> Self {
        Self::UploadStateDamaged(msg.into())
    }
}
