/// Probe-specific errors
use thiserror::Error;

/// Result type alias using `ProbeError`
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Probe error types
#[derive(Error, Debug)]
pub enum ProbeError {
    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<ProbeError> for tonearm_core::LibraryError {
    fn from(err: ProbeError) -> Self {
        tonearm_core::LibraryError::probe(err.to_string())
    }
}
