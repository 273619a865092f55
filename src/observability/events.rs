//! Observable lifecycle events of the log store
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in drifter-sd
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Medium
    /// Medium bound
    MediumBound,
    /// Medium could not be bound
    MediumBindFailed,

    // Destinations
    /// Destination opened in append-create mode
    DestinationOpened,
    /// Destination could not be opened
    DestinationOpenFailed,

    // Writes
    /// Record appended to a destination
    RecordAppended,
    /// Destination flushed to the medium
    RecordFlushed,
    /// Append or flush failed
    WriteFailed,

    /// Operation invoked in the wrong store state
    PreconditionViolated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::MediumBound => "MEDIUM_BOUND",
            Event::MediumBindFailed => "MEDIUM_BIND_FAILED",
            Event::DestinationOpened => "DESTINATION_OPENED",
            Event::DestinationOpenFailed => "DESTINATION_OPEN_FAILED",
            Event::RecordAppended => "RECORD_APPENDED",
            Event::RecordFlushed => "RECORD_FLUSHED",
            Event::WriteFailed => "WRITE_FAILED",
            Event::PreconditionViolated => "PRECONDITION_VIOLATED",
        }
    }

    /// Returns true if this event is a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::MediumBindFailed
                | Event::DestinationOpenFailed
                | Event::WriteFailed
                | Event::PreconditionViolated
        )
    }

    /// Returns true for high-volume per-record events
    pub fn is_per_record(&self) -> bool {
        matches!(self, Event::RecordAppended | Event::RecordFlushed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
