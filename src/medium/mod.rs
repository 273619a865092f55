//! # Storage Medium
//!
//! The removable card the drifter logs to, seen through the
//! [`StorageDriver`] trait: bind, open, append, flush.
//!
//! Two drivers ship with the crate:
//! - [`DirectoryDriver`]: a host directory stands in for the card root
//! - [`MemoryDriver`]: an in-memory card with failure injection

pub mod directory;
pub mod driver;
pub mod errors;
pub mod memory;

pub use directory::{DirectoryDriver, DirectoryHandle};
pub use driver::{OpenMode, SelectionToken, StorageDriver};
pub use errors::{MediumError, MediumResult};
pub use memory::{MemoryDriver, MemoryHandle};
