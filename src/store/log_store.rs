//! AppendLogStore: the dual-log storage manager
//!
//! Lifecycle:
//! 1. `initialize_medium` binds the card (one console status line)
//! 2. `open_destinations` opens `/DATA.CSV` then `/ERRORS.TXT` in
//!    append-create mode
//! 3. `write_data` / `write_error` append and flush before returning
//!
//! Init and open failures are reported on the console and returned as
//! `false`. Write failures are returned as [`StoreError`]. Nothing is
//! retried.

use std::borrow::Cow;

use crate::config::StoreConfig;
use crate::console::ConsoleReporter;
use crate::medium::{DirectoryDriver, OpenMode, SelectionToken, StorageDriver};
use crate::observability::{log_event_with_fields, Event};

use super::destination::{Destination, LineTerminator};
use super::errors::{StoreError, StoreResult};
use super::state::StoreState;

/// Console line after a successful bind
pub const INITIALIZED_NOTICE: &str = "SD card initialized";
/// Console line after a failed bind
pub const BIND_FAILED_NOTICE: &str = "Couldn't initialize SD card";
/// Console line when `initialize_medium` is called a second time
pub const ALREADY_INITIALIZED_NOTICE: &str = "SD card already initialized";
/// Console line when `open_destinations` runs before a successful bind
pub const NOT_INITIALIZED_NOTICE: &str = "SD card not initialized";

/// Append-only store for the data and error logs of one card.
///
/// Owns the driver, the console and both destination handles. All
/// mutating calls take `&mut self`; see
/// [`SharedLogStore`](super::SharedLogStore) for multi-threaded hosts.
pub struct AppendLogStore<D: StorageDriver, C: ConsoleReporter> {
    driver: D,
    console: C,
    token: SelectionToken,
    terminator: LineTerminator,
    state: StoreState,
    data: Option<D::Handle>,
    error: Option<D::Handle>,
}

impl<D: StorageDriver, C: ConsoleReporter> AppendLogStore<D, C> {
    /// Create a store with the default selection token and `\n` terminator.
    pub fn new(driver: D, console: C) -> Self {
        Self {
            driver,
            console,
            token: SelectionToken::DEFAULT,
            terminator: LineTerminator::default(),
            state: StoreState::Uninitialized,
            data: None,
            error: None,
        }
    }

    /// Create a store using the token and terminator from `config`.
    pub fn with_config(driver: D, console: C, config: &StoreConfig) -> Self {
        Self::new(driver, console)
            .with_selection_token(config.selection_token())
            .with_line_terminator(config.line_terminator)
    }

    /// Set the selection token used by `initialize_medium`.
    pub fn with_selection_token(mut self, token: SelectionToken) -> Self {
        self.token = token;
        self
    }

    /// Set the terminator appended by `write_error`.
    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Bind the storage medium.
    ///
    /// Reports exactly one status line on the console. Returns false if
    /// the card does not respond, leaving the store unusable; the caller
    /// decides whether to halt.
    ///
    /// Calling it again after a successful bind is a precondition
    /// violation: it reports it, keeps the existing binding and returns
    /// false.
    pub fn initialize_medium(&mut self) -> bool {
        if self.state.is_medium_ready() {
            self.console.report(ALREADY_INITIALIZED_NOTICE);
            self.precondition_violated("initialize_medium");
            return false;
        }

        let token = self.token.to_string();
        if !self.driver.bind(self.token) {
            let err = StoreError::bind_failed(self.token);
            self.console.report(BIND_FAILED_NOTICE);
            log_event_with_fields(
                Event::MediumBindFailed,
                &[("selection_token", token.as_str()), ("error", err.to_string().as_str())],
            );
            return false;
        }

        self.state = StoreState::MediumReady;
        self.console.report(INITIALIZED_NOTICE);
        log_event_with_fields(Event::MediumBound, &[("selection_token", token.as_str())]);
        true
    }

    /// Open the data and error destinations in append-create mode.
    ///
    /// Returns true only if both are open. A data open failure returns
    /// immediately without attempting the error destination. An error
    /// open failure leaves the data destination open; nothing is rolled
    /// back. A later call only opens what is still closed.
    pub fn open_destinations(&mut self) -> bool {
        match self.state {
            StoreState::Uninitialized => {
                self.console.report(NOT_INITIALIZED_NOTICE);
                self.precondition_violated("open_destinations");
                return false;
            }
            StoreState::DestinationsOpen => return true,
            StoreState::MediumReady => {}
        }

        for destination in Destination::ALL {
            if self.is_open(destination) {
                continue;
            }

            match self.driver.open(destination.path(), OpenMode::AppendCreate) {
                Ok(handle) => {
                    *self.slot_mut(destination) = Some(handle);
                    log_event_with_fields(
                        Event::DestinationOpened,
                        &[("destination", destination.name()), ("path", destination.path())],
                    );
                }
                Err(e) => {
                    let err = StoreError::open_failed(destination.path(), e);
                    self.console.report(destination.open_failure_notice());
                    log_event_with_fields(
                        Event::DestinationOpenFailed,
                        &[
                            ("destination", destination.name()),
                            ("error", err.to_string().as_str()),
                        ],
                    );
                    return false;
                }
            }
        }

        self.state = StoreState::DestinationsOpen;
        true
    }

    /// Append `text` verbatim to `/DATA.CSV` and flush.
    ///
    /// No terminator is added: data records arrive pre-delimited.
    pub fn write_data(&mut self, text: &str) -> StoreResult<()> {
        self.write(Destination::Data, text)
    }

    /// Append `text` plus one line terminator to `/ERRORS.TXT` and flush.
    pub fn write_error(&mut self, text: &str) -> StoreResult<()> {
        self.write(Destination::Error, text)
    }

    /// Whether the medium is close to full.
    ///
    /// Always false: no free-space accounting is performed.
    // TODO: query free clusters once StorageDriver exposes volume accounting.
    pub fn medium_near_capacity(&self) -> bool {
        false
    }

    /// Current lifecycle state
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Whether `destination` has an open handle
    pub fn is_open(&self, destination: Destination) -> bool {
        match destination {
            Destination::Data => self.data.is_some(),
            Destination::Error => self.error.is_some(),
        }
    }

    /// Selection token used for binding
    pub fn selection_token(&self) -> SelectionToken {
        self.token
    }

    /// Terminator appended by `write_error`
    pub fn line_terminator(&self) -> LineTerminator {
        self.terminator
    }

    /// The storage driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The console reporter
    pub fn console(&self) -> &C {
        &self.console
    }

    fn slot_mut(&mut self, destination: Destination) -> &mut Option<D::Handle> {
        match destination {
            Destination::Data => &mut self.data,
            Destination::Error => &mut self.error,
        }
    }

    fn precondition_violated(&self, operation: &str) {
        log_event_with_fields(
            Event::PreconditionViolated,
            &[("operation", operation), ("state", self.state.as_str())],
        );
    }

    fn write(&mut self, destination: Destination, text: &str) -> StoreResult<()> {
        let operation = match destination {
            Destination::Data => "write_data",
            Destination::Error => "write_error",
        };
        let state = self.state;
        if !state.accepts_writes() {
            self.precondition_violated(operation);
            return Err(StoreError::not_ready(operation, state));
        }

        let bytes: Cow<'_, [u8]> = if destination.terminates_lines() {
            let mut line = Vec::with_capacity(text.len() + 2);
            line.extend_from_slice(text.as_bytes());
            line.extend_from_slice(self.terminator.as_bytes());
            Cow::Owned(line)
        } else {
            Cow::Borrowed(text.as_bytes())
        };

        let handle = match destination {
            Destination::Data => self.data.as_mut(),
            Destination::Error => self.error.as_mut(),
        }
        .ok_or_else(|| StoreError::not_ready(operation, state))?;

        let result = append_and_flush(&mut self.driver, handle, destination, &bytes);
        if let Err(ref err) = result {
            log_event_with_fields(
                Event::WriteFailed,
                &[
                    ("destination", destination.name()),
                    ("code", err.code().code()),
                    ("error", err.to_string().as_str()),
                ],
            );
        }
        result
    }
}

impl<C: ConsoleReporter> AppendLogStore<DirectoryDriver, C> {
    /// Store over a host directory, configured from `config`.
    pub fn for_directory(config: &StoreConfig, console: C) -> Self {
        Self::with_config(DirectoryDriver::new(config.medium_path()), console, config)
    }
}

/// One append followed by one flush; the record is durable when this returns Ok.
fn append_and_flush<D: StorageDriver>(
    driver: &mut D,
    handle: &mut D::Handle,
    destination: Destination,
    bytes: &[u8],
) -> StoreResult<()> {
    let path = destination.path();
    let len = bytes.len().to_string();

    driver
        .append(handle, bytes)
        .map_err(|e| StoreError::append_failed(path, e))?;
    log_event_with_fields(Event::RecordAppended, &[("path", path), ("bytes", len.as_str())]);

    driver
        .flush(handle)
        .map_err(|e| StoreError::flush_failed(path, e))?;
    log_event_with_fields(Event::RecordFlushed, &[("path", path)]);

    Ok(())
}
