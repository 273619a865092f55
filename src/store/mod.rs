//! Append-only dual-log store
//!
//! The store binds one storage card, keeps `/DATA.CSV` and `/ERRORS.TXT`
//! open for its whole lifetime and flushes after every write.
//!
//! # Usage
//!
//! ```ignore
//! use drifter_sd::console::StdoutConsole;
//! use drifter_sd::medium::DirectoryDriver;
//! use drifter_sd::store::AppendLogStore;
//!
//! let mut store = AppendLogStore::new(DirectoryDriver::new("/mnt/card"), StdoutConsole);
//! if !store.initialize_medium() || !store.open_destinations() {
//!     return; // caller decides whether to halt
//! }
//! store.write_data("12.3,45.6\n")?;
//! store.write_error("sensor timeout")?;
//! ```

mod destination;
mod errors;
mod log_store;
mod shared;
mod state;

pub use destination::{Destination, LineTerminator, DATA_PATH, ERROR_PATH};
pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use log_store::{
    AppendLogStore, ALREADY_INITIALIZED_NOTICE, BIND_FAILED_NOTICE, INITIALIZED_NOTICE,
    NOT_INITIALIZED_NOTICE,
};
pub use shared::SharedLogStore;
pub use state::StoreState;
