//! CLI command implementations
//!
//! Each invocation runs one device boot: load config, bind the medium,
//! open both destinations, then perform the requested write.

use std::fmt;
use std::path::Path;

use crate::config::StoreConfig;
use crate::console::{ConsoleReporter, StdoutConsole};
use crate::medium::DirectoryDriver;
use crate::store::{AppendLogStore, StoreState};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Run the CLI: parse args and dispatch
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Data {
            config,
            text,
            newline,
        } => data(&config, &text, newline, StdoutConsole),
        Command::Error { config, text } => error(&config, &text, StdoutConsole),
        Command::Status { config } => {
            let report = status(&config, StdoutConsole)?;
            println!("{}", report);
            Ok(())
        }
    }
}

/// Load config and bring the store up to `DestinationsOpen`.
///
/// The store has already reported the failure on the console when this
/// returns an error.
pub fn boot<C: ConsoleReporter>(
    config_path: &Path,
    console: C,
) -> CliResult<AppendLogStore<DirectoryDriver, C>> {
    let config = StoreConfig::load(config_path)?;
    let mut store = AppendLogStore::for_directory(&config, console);

    if !store.initialize_medium() {
        return Err(CliError::boot_failed(format!(
            "medium at {} could not be bound",
            config.medium_root
        )));
    }
    if !store.open_destinations() {
        return Err(CliError::boot_failed("log destinations could not be opened"));
    }

    Ok(store)
}

/// Append one data record
pub fn data<C: ConsoleReporter>(
    config_path: &Path,
    text: &str,
    newline: bool,
    console: C,
) -> CliResult<()> {
    let mut store = boot(config_path, console)?;
    if newline {
        store.write_data(&format!("{}\n", text))?;
    } else {
        store.write_data(text)?;
    }
    Ok(())
}

/// Append one error line
pub fn error<C: ConsoleReporter>(config_path: &Path, text: &str, console: C) -> CliResult<()> {
    let mut store = boot(config_path, console)?;
    store.write_error(text)?;
    Ok(())
}

/// Store status after boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub medium_root: String,
    pub state: StoreState,
    pub near_capacity: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "medium_root={} state={} near_capacity={}",
            self.medium_root, self.state, self.near_capacity
        )
    }
}

/// Boot the store and report its state
pub fn status<C: ConsoleReporter>(config_path: &Path, console: C) -> CliResult<StatusReport> {
    let store = boot(config_path, console)?;
    Ok(StatusReport {
        medium_root: store.driver().root().display().to_string(),
        state: store.state(),
        near_capacity: store.medium_near_capacity(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use crate::console::MemoryConsole;
    use crate::store::{BIND_FAILED_NOTICE, INITIALIZED_NOTICE};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &Path, medium_root: &Path) -> PathBuf {
        let path = dir.join("drifter.json");
        let config = StoreConfig::new(medium_root.display().to_string());
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_data_and_error_commands() {
        let temp = TempDir::new().unwrap();
        let card = temp.path().join("card");
        fs::create_dir(&card).unwrap();
        let config = write_config(temp.path(), &card);

        data(&config, "12.3,45.6", true, MemoryConsole::new()).unwrap();
        data(&config, "7.0,8.0\n", false, MemoryConsole::new()).unwrap();
        error(&config, "sensor timeout", MemoryConsole::new()).unwrap();

        assert_eq!(fs::read_to_string(card.join("DATA.CSV")).unwrap(), "12.3,45.6\n7.0,8.0\n");
        assert_eq!(fs::read_to_string(card.join("ERRORS.TXT")).unwrap(), "sensor timeout\n");
    }

    #[test]
    fn test_boot_fails_without_card() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), &temp.path().join("no-card"));
        let console = MemoryConsole::new();

        let err = data(&config, "1,2", true, console.clone()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert_eq!(console.lines(), vec![BIND_FAILED_NOTICE]);
    }

    #[test]
    fn test_status_report() {
        let temp = TempDir::new().unwrap();
        let card = temp.path().join("card");
        fs::create_dir(&card).unwrap();
        let config = write_config(temp.path(), &card);
        let console = MemoryConsole::new();

        let report = status(&config, console.clone()).unwrap();
        assert_eq!(report.state, StoreState::DestinationsOpen);
        assert!(!report.near_capacity);
        assert!(report.to_string().contains("state=DESTINATIONS_OPEN"));
        assert_eq!(console.lines(), vec![INITIALIZED_NOTICE]);
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = status(&temp.path().join("absent.json"), MemoryConsole::new()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
