//! # Host Directory Driver
//!
//! Maps the card's root directory onto a directory of the host
//! filesystem. Used by the host simulator and by on-disk tests.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::driver::{OpenMode, SelectionToken, StorageDriver};
use super::errors::{MediumError, MediumResult};

/// Open file on a [`DirectoryDriver`] medium
#[derive(Debug)]
pub struct DirectoryHandle {
    path: PathBuf,
    file: File,
}

impl DirectoryHandle {
    /// Host path of the open file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Storage driver backed by a host directory
#[derive(Debug)]
pub struct DirectoryDriver {
    root: PathBuf,
    bound: bool,
}

impl DirectoryDriver {
    /// Create a driver for the given root. Nothing is touched until `bind`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bound: false,
        }
    }

    /// Root directory standing in for the card
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `bind` has succeeded
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Resolve a card path ("/DATA.CSV") under the root.
    pub fn host_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl StorageDriver for DirectoryDriver {
    type Handle = DirectoryHandle;

    fn bind(&mut self, token: SelectionToken) -> bool {
        // The token addresses real hardware only; a host root is bound if it exists.
        self.bound = self.root.is_dir();
        debug!(root = %self.root.display(), %token, bound = self.bound, "bind");
        self.bound
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> MediumResult<DirectoryHandle> {
        if !self.bound {
            return Err(MediumError::NotBound);
        }

        let host_path = self.host_path(path);
        let file = match mode {
            OpenMode::AppendCreate => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&host_path)
                .map_err(|e| MediumError::open_failed(path, e.to_string()))?,
        };

        Ok(DirectoryHandle {
            path: host_path,
            file,
        })
    }

    fn append(&mut self, handle: &mut DirectoryHandle, bytes: &[u8]) -> MediumResult<()> {
        handle
            .file
            .write_all(bytes)
            .map_err(|e| MediumError::AppendFailed(e.to_string()))
    }

    fn flush(&mut self, handle: &mut DirectoryHandle) -> MediumResult<()> {
        handle
            .file
            .flush()
            .and_then(|_| handle.file.sync_all())
            .map_err(|e| MediumError::FlushFailed(e.to_string()))
    }
}
