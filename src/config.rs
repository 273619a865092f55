//! Store configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!     "medium_root": "/mnt/card",
//!     "selection_token": 4,
//!     "line_terminator": "lf"
//! }
//! ```
//!
//! Only `medium_root` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::medium::SelectionToken;
use crate::observability::{log_event_with_fields, Event};
use crate::store::LineTerminator;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration of one [`AppendLogStore`](crate::store::AppendLogStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory standing in for the card root (host drivers only)
    pub medium_root: String,

    /// Chip-select line of the card (default 4)
    #[serde(default = "default_selection_token")]
    pub selection_token: u8,

    /// Terminator appended by `write_error` (default "lf")
    #[serde(default)]
    pub line_terminator: LineTerminator,
}

fn default_selection_token() -> u8 {
    SelectionToken::DEFAULT.line()
}

impl StoreConfig {
    /// Defaults for the given medium root
    pub fn new(medium_root: impl Into<String>) -> Self {
        Self {
            medium_root: medium_root.into(),
            selection_token: default_selection_token(),
            line_terminator: LineTerminator::default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&content)?;

        let shown = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", shown.as_str()), ("medium_root", config.medium_root.as_str())],
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.medium_root.trim().is_empty() {
            return Err(ConfigError::Invalid("medium_root must not be empty".to_string()));
        }
        Ok(())
    }

    /// Selection token as a typed value
    pub fn selection_token(&self) -> SelectionToken {
        SelectionToken(self.selection_token)
    }

    /// Medium root as a path
    pub fn medium_path(&self) -> PathBuf {
        PathBuf::from(&self.medium_root)
    }
}
