//! drifter-sd - append-only dual-log storage for drifter field devices
//!
//! Binds a removable storage card, keeps `/DATA.CSV` and `/ERRORS.TXT`
//! open in append mode, and flushes after every record. Initialization
//! failures are reported once on the device console.
//!
//! # Modules
//!
//! - [`store`]: the [`AppendLogStore`](store::AppendLogStore) lifecycle and writes
//! - [`medium`]: the [`StorageDriver`](medium::StorageDriver) seam and shipped drivers
//! - [`console`]: the [`ConsoleReporter`](console::ConsoleReporter) status channel
//! - [`config`]: JSON configuration
//! - [`observability`]: typed events over `tracing`
//! - [`cli`]: host simulator commands

pub mod cli;
pub mod config;
pub mod console;
pub mod medium;
pub mod observability;
pub mod store;
