//! # Storage Medium Errors

use thiserror::Error;

/// Result type for driver operations
pub type MediumResult<T> = Result<T, MediumError>;

/// Errors raised by a [`StorageDriver`](super::StorageDriver)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediumError {
    /// `open` before a successful `bind`. A failed bind itself is the
    /// `false` returned by `bind`.
    #[error("Medium not bound")]
    NotBound,

    #[error("Failed to open {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Append failed: {0}")]
    AppendFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl MediumError {
    /// Open failure for the given card path
    pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MediumError::OpenFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for MediumError {
    fn from(e: std::io::Error) -> Self {
        MediumError::Io(e.to_string())
    }
}
