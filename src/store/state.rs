//! Store lifecycle state

use std::fmt;

/// Lifecycle of an [`AppendLogStore`](super::AppendLogStore).
///
/// Transitions only move forward:
/// `Uninitialized -> MediumReady -> DestinationsOpen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum StoreState {
    /// Medium not bound (initial, and after a failed bind)
    #[default]
    Uninitialized,
    /// Medium bound, destinations not (all) open
    MediumReady,
    /// Both destinations open, writes allowed
    DestinationsOpen,
}

impl StoreState {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreState::Uninitialized => "UNINITIALIZED",
            StoreState::MediumReady => "MEDIUM_READY",
            StoreState::DestinationsOpen => "DESTINATIONS_OPEN",
        }
    }

    /// Whether the medium has been bound
    pub fn is_medium_ready(&self) -> bool {
        *self >= StoreState::MediumReady
    }

    /// Whether writes are allowed
    pub fn accepts_writes(&self) -> bool {
        *self == StoreState::DestinationsOpen
    }
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
