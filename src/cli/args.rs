//! CLI argument definitions using clap
//!
//! Commands:
//! - drifter-sd data --config <path> <TEXT>
//! - drifter-sd error --config <path> <TEXT>
//! - drifter-sd status --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// drifter-sd - host simulator for the drifter card logger
#[derive(Parser, Debug)]
#[command(name = "drifter-sd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append a measurement record to /DATA.CSV (verbatim unless --newline)
    Data {
        /// Path to configuration file
        #[arg(long, default_value = "./drifter.json")]
        config: PathBuf,

        /// Record text, written verbatim
        text: String,

        /// Append a newline after the text
        #[arg(long)]
        newline: bool,
    },

    /// Append an error line to /ERRORS.TXT
    Error {
        /// Path to configuration file
        #[arg(long, default_value = "./drifter.json")]
        config: PathBuf,

        /// Error message
        text: String,
    },

    /// Boot the store and print its state
    Status {
        /// Path to configuration file
        #[arg(long, default_value = "./drifter.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
