//! CLI module for drifter-sd
//!
//! Host-side simulator of the device loop:
//! - data: append a measurement record
//! - error: append an error line
//! - status: boot the store and print its state

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{boot, data, error, run, run_command, status, StatusReport};
pub use errors::{CliError, CliErrorCode, CliResult};
