//! Log destinations and line terminators

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path of the measurement log on the card
pub const DATA_PATH: &str = "/DATA.CSV";

/// Path of the error log on the card
pub const ERROR_PATH: &str = "/ERRORS.TXT";

/// One of the two append-only files the store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Measurement records; the caller supplies delimiters
    Data,
    /// Error messages; the store terminates each line
    Error,
}

impl Destination {
    /// Both destinations, in open order
    pub const ALL: [Destination; 2] = [Destination::Data, Destination::Error];

    /// Card path of this destination
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Data => DATA_PATH,
            Destination::Error => ERROR_PATH,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Destination::Data => "data",
            Destination::Error => "error",
        }
    }

    /// Console notice when opening this destination fails
    pub fn open_failure_notice(&self) -> &'static str {
        match self {
            Destination::Data => "Couldn't open log file",
            Destination::Error => "Couldn't open error file",
        }
    }

    /// Whether writes to this destination get a line terminator appended
    pub fn terminates_lines(&self) -> bool {
        matches!(self, Destination::Error)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Line terminator appended to error records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineTerminator {
    /// Terminator bytes
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::Crlf => b"\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Destination::Data.path(), "/DATA.CSV");
        assert_eq!(Destination::Error.path(), "/ERRORS.TXT");
    }

    #[test]
    fn test_only_error_destination_terminates_lines() {
        assert!(!Destination::Data.terminates_lines());
        assert!(Destination::Error.terminates_lines());
    }

    #[test]
    fn test_distinct_failure_notices() {
        assert_ne!(
            Destination::Data.open_failure_notice(),
            Destination::Error.open_failure_notice()
        );
    }

    #[test]
    fn test_terminator_bytes() {
        assert_eq!(LineTerminator::Lf.as_bytes(), b"\n");
        assert_eq!(LineTerminator::Crlf.as_bytes(), b"\r\n");
        assert_eq!(LineTerminator::default(), LineTerminator::Lf);
    }
}
