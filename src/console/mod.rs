//! # Console Reporter
//!
//! The human-visible status channel (the serial port on the device).
//! Reports are fire-and-forget: one line in, nothing back.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for one-line status and failure notices
pub trait ConsoleReporter {
    /// Report a single line. Never fails from the caller's point of view.
    fn report(&mut self, line: &str);
}

/// Console that prints each line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl ConsoleReporter for StdoutConsole {
    fn report(&mut self, line: &str) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        // Console output is best-effort.
        let _ = writeln!(handle, "{}", line);
        let _ = handle.flush();
    }
}

/// Console that records lines in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryConsole {
    /// Create an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reported lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of reported lines.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConsoleReporter for MemoryConsole {
    fn report(&mut self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

impl<C: ConsoleReporter + ?Sized> ConsoleReporter for Box<C> {
    fn report(&mut self, line: &str) {
        (**self).report(line)
    }
}
