//! drifter-sd CLI entry point
//!
//! Installs the diagnostic subscriber, then delegates to the CLI module.
//! Prints errors to stderr and exits non-zero on failure.

use drifter_sd::{cli, observability};

fn main() {
    observability::init_tracing("info");

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
