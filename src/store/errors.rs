//! Store error types
//!
//! Error codes:
//! - DRIFTER_MEDIUM_BIND_FAILED (FATAL severity)
//! - DRIFTER_DESTINATION_OPEN_FAILED (ERROR severity)
//! - DRIFTER_STORE_NOT_READY (ERROR severity)
//! - DRIFTER_STORE_APPEND_FAILED (ERROR severity)
//! - DRIFTER_STORE_FLUSH_FAILED (FATAL severity)
//! - DRIFTER_STORE_LOCK_POISONED (FATAL severity)

use std::fmt;

use crate::medium::{MediumError, SelectionToken};

use super::state::StoreState;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, the device loop may continue
    Error,
    /// Nothing further can be logged reliably
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Medium could not be bound
    MediumBindFailed,
    /// A destination could not be opened
    DestinationOpenFailed,
    /// Operation called in the wrong state
    NotReady,
    /// Append to a destination failed
    AppendFailed,
    /// Flush of a destination failed
    FlushFailed,
    /// Shared store lock poisoned by a panicking writer
    LockPoisoned,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::MediumBindFailed => "DRIFTER_MEDIUM_BIND_FAILED",
            StoreErrorCode::DestinationOpenFailed => "DRIFTER_DESTINATION_OPEN_FAILED",
            StoreErrorCode::NotReady => "DRIFTER_STORE_NOT_READY",
            StoreErrorCode::AppendFailed => "DRIFTER_STORE_APPEND_FAILED",
            StoreErrorCode::FlushFailed => "DRIFTER_STORE_FLUSH_FAILED",
            StoreErrorCode::LockPoisoned => "DRIFTER_STORE_LOCK_POISONED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::MediumBindFailed => Severity::Fatal,
            StoreErrorCode::DestinationOpenFailed => Severity::Error,
            StoreErrorCode::NotReady => Severity::Error,
            StoreErrorCode::AppendFailed => Severity::Error,
            StoreErrorCode::FlushFailed => Severity::Fatal,
            StoreErrorCode::LockPoisoned => Severity::Fatal,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<MediumError>,
}

impl StoreError {
    /// Medium did not respond to bind
    pub fn bind_failed(token: SelectionToken) -> Self {
        Self {
            code: StoreErrorCode::MediumBindFailed,
            message: "Failed to bind storage medium".to_string(),
            details: Some(format!("selection_token: {}", token)),
            source: None,
        }
    }

    /// Destination open failed
    pub fn open_failed(path: &str, source: MediumError) -> Self {
        Self {
            code: StoreErrorCode::DestinationOpenFailed,
            message: format!("Failed to open destination {}", path),
            details: None,
            source: Some(source),
        }
    }

    /// Operation invoked out of order
    pub fn not_ready(operation: &str, state: StoreState) -> Self {
        Self {
            code: StoreErrorCode::NotReady,
            message: format!("{} called before destinations were open", operation),
            details: Some(format!("state: {}", state)),
            source: None,
        }
    }

    /// Append failed
    pub fn append_failed(path: &str, source: MediumError) -> Self {
        Self {
            code: StoreErrorCode::AppendFailed,
            message: format!("Failed to append to {}", path),
            details: None,
            source: Some(source),
        }
    }

    /// Flush failed; appended bytes may not be on the medium
    pub fn flush_failed(path: &str, source: MediumError) -> Self {
        Self {
            code: StoreErrorCode::FlushFailed,
            message: format!("Failed to flush {}", path),
            details: None,
            source: Some(source),
        }
    }

    /// Shared store lock poisoned
    pub fn lock_poisoned() -> Self {
        Self {
            code: StoreErrorCode::LockPoisoned,
            message: "Shared store lock poisoned".to_string(),
            details: None,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the driver error behind this one, if any
    pub fn medium_error(&self) -> Option<&MediumError> {
        self.source.as_ref()
    }

    /// Returns whether this error is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreErrorCode::MediumBindFailed.code(), "DRIFTER_MEDIUM_BIND_FAILED");
        assert_eq!(
            StoreErrorCode::DestinationOpenFailed.code(),
            "DRIFTER_DESTINATION_OPEN_FAILED"
        );
        assert_eq!(StoreErrorCode::NotReady.code(), "DRIFTER_STORE_NOT_READY");
        assert_eq!(StoreErrorCode::AppendFailed.code(), "DRIFTER_STORE_APPEND_FAILED");
        assert_eq!(StoreErrorCode::FlushFailed.code(), "DRIFTER_STORE_FLUSH_FAILED");
    }

    #[test]
    fn test_flush_failed_is_fatal() {
        let err = StoreError::flush_failed("/DATA.CSV", MediumError::FlushFailed("eio".into()));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_append_failed_is_not_fatal() {
        let err = StoreError::append_failed("/DATA.CSV", MediumError::AppendFailed("eio".into()));
        assert!(!err.is_fatal());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_ready_display() {
        let err = StoreError::not_ready("write_data", StoreState::MediumReady);
        let display = err.to_string();
        assert!(display.contains("[ERROR]"));
        assert!(display.contains("DRIFTER_STORE_NOT_READY"));
        assert!(display.contains("write_data"));
        assert!(display.contains("state: MEDIUM_READY"));
    }

    #[test]
    fn test_bind_failed_details() {
        let err = StoreError::bind_failed(SelectionToken(4));
        assert!(err.is_fatal());
        assert_eq!(err.details(), Some("selection_token: cs4"));
    }
}
