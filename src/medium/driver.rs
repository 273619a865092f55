//! # Storage Driver Trait

use std::fmt;

use super::errors::MediumResult;

/// Hardware address of the storage card (the chip-select line on SPI cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionToken(pub u8);

impl SelectionToken {
    /// Chip-select line wired to the card on the drifter board
    pub const DEFAULT: SelectionToken = SelectionToken(4);

    /// Returns the raw line number
    pub fn line(&self) -> u8 {
        self.0
    }
}

impl Default for SelectionToken {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cs{}", self.0)
    }
}

/// How a path is opened on the medium.
///
/// Only append-create exists: create the file if absent, otherwise
/// position every write at end-of-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    AppendCreate,
}

/// Block-storage driver and filesystem of the card.
///
/// The store depends on these four primitives only.
pub trait StorageDriver {
    /// Open file handle
    type Handle;

    /// Bind the medium addressed by `token`. Returns false if the card
    /// does not respond.
    fn bind(&mut self, token: SelectionToken) -> bool;

    /// Open `path` (rooted at the card's root directory).
    fn open(&mut self, path: &str, mode: OpenMode) -> MediumResult<Self::Handle>;

    /// Append `bytes` at end-of-file.
    fn append(&mut self, handle: &mut Self::Handle, bytes: &[u8]) -> MediumResult<()>;

    /// Force everything appended so far onto the physical medium.
    fn flush(&mut self, handle: &mut Self::Handle) -> MediumResult<()>;
}
