//! # In-Memory Driver
//!
//! A card that lives in memory, with failure injection. Clones share the
//! same card, so a test can keep one clone for inspection while the store
//! owns the other.
//!
//! Appended bytes sit in the handle until `flush`; only flushed bytes are
//! visible through [`MemoryDriver::contents`].

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::driver::{OpenMode, SelectionToken, StorageDriver};
use super::errors::{MediumError, MediumResult};

/// Open file on a [`MemoryDriver`] medium
#[derive(Debug)]
pub struct MemoryHandle {
    path: String,
    pending: Vec<u8>,
}

impl MemoryHandle {
    /// Card path of the open file
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Default)]
struct MemoryCard {
    files: BTreeMap<String, Vec<u8>>,
    bound_token: Option<SelectionToken>,
    open_attempts: Vec<String>,
    flush_count: usize,
    fail_bind: bool,
    failing_opens: HashSet<String>,
    fail_append: bool,
    fail_flush: bool,
}

/// In-memory storage driver
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    card: Arc<Mutex<MemoryCard>>,
}

impl MemoryDriver {
    /// Create an empty, healthy card.
    pub fn new() -> Self {
        Self::default()
    }

    fn card(&self) -> MutexGuard<'_, MemoryCard> {
        self.card.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent `bind` fail (no card inserted).
    pub fn fail_bind(&self) -> &Self {
        self.card().fail_bind = true;
        self
    }

    /// Make `open` fail for the given card path.
    pub fn fail_open(&self, path: &str) -> &Self {
        self.card().failing_opens.insert(path.to_string());
        self
    }

    /// Make every subsequent `append` fail.
    pub fn fail_append(&self) -> &Self {
        self.card().fail_append = true;
        self
    }

    /// Make every subsequent `flush` fail.
    pub fn fail_flush(&self) -> &Self {
        self.card().fail_flush = true;
        self
    }

    /// Clear every injected failure.
    pub fn heal(&self) {
        let mut card = self.card();
        card.fail_bind = false;
        card.failing_opens.clear();
        card.fail_append = false;
        card.fail_flush = false;
    }

    /// Pre-populate a file, as if written in an earlier session.
    pub fn preload(&self, path: &str, bytes: &[u8]) {
        self.card()
            .files
            .insert(path.to_string(), bytes.to_vec());
    }

    /// Flushed contents of `path`, if the file exists.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.card().files.get(path).cloned()
    }

    /// Flushed contents of `path` as UTF-8 (lossy), empty if absent.
    pub fn contents_string(&self, path: &str) -> String {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Token of the last successful bind
    pub fn bound_token(&self) -> Option<SelectionToken> {
        self.card().bound_token
    }

    /// Every path passed to `open`, in call order, including failed opens.
    pub fn open_attempts(&self) -> Vec<String> {
        self.card().open_attempts.clone()
    }

    /// Number of successful flushes
    pub fn flush_count(&self) -> usize {
        self.card().flush_count
    }
}

impl StorageDriver for MemoryDriver {
    type Handle = MemoryHandle;

    fn bind(&mut self, token: SelectionToken) -> bool {
        let mut card = self.card();
        if card.fail_bind {
            return false;
        }
        card.bound_token = Some(token);
        true
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> MediumResult<MemoryHandle> {
        let mut card = self.card();
        card.open_attempts.push(path.to_string());

        if card.bound_token.is_none() {
            return Err(MediumError::NotBound);
        }
        if card.failing_opens.contains(path) {
            return Err(MediumError::open_failed(path, "injected open failure"));
        }

        match mode {
            OpenMode::AppendCreate => {
                card.files.entry(path.to_string()).or_default();
            }
        }

        Ok(MemoryHandle {
            path: path.to_string(),
            pending: Vec::new(),
        })
    }

    fn append(&mut self, handle: &mut MemoryHandle, bytes: &[u8]) -> MediumResult<()> {
        if self.card().fail_append {
            return Err(MediumError::AppendFailed("injected append failure".to_string()));
        }
        handle.pending.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self, handle: &mut MemoryHandle) -> MediumResult<()> {
        let mut card = self.card();
        if card.fail_flush {
            return Err(MediumError::FlushFailed("injected flush failure".to_string()));
        }
        let pending = std::mem::take(&mut handle.pending);
        card.files
            .entry(handle.path.clone())
            .or_default()
            .extend_from_slice(&pending);
        card.flush_count += 1;
        Ok(())
    }
}
