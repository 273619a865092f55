//! Mutex-guarded store for hosts with several producer threads.
//!
//! Every operation takes the lock for its full duration, including the
//! flush, so records from different threads never interleave.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::console::ConsoleReporter;
use crate::medium::StorageDriver;

use super::errors::{StoreError, StoreResult};
use super::log_store::AppendLogStore;
use super::state::StoreState;

/// Shared handle to one [`AppendLogStore`]. Clones share the same store.
pub struct SharedLogStore<D: StorageDriver, C: ConsoleReporter> {
    inner: Arc<Mutex<AppendLogStore<D, C>>>,
}

impl<D: StorageDriver, C: ConsoleReporter> Clone for SharedLogStore<D, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: StorageDriver, C: ConsoleReporter> SharedLogStore<D, C> {
    /// Wrap a store.
    pub fn new(store: AppendLogStore<D, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, AppendLogStore<D, C>>> {
        self.inner.lock().map_err(|_| StoreError::lock_poisoned())
    }

    /// See [`AppendLogStore::initialize_medium`]. False if the lock is poisoned.
    pub fn initialize_medium(&self) -> bool {
        self.lock()
            .map(|mut store| store.initialize_medium())
            .unwrap_or(false)
    }

    /// See [`AppendLogStore::open_destinations`]. False if the lock is poisoned.
    pub fn open_destinations(&self) -> bool {
        self.lock()
            .map(|mut store| store.open_destinations())
            .unwrap_or(false)
    }

    /// See [`AppendLogStore::write_data`].
    pub fn write_data(&self, text: &str) -> StoreResult<()> {
        self.lock()?.write_data(text)
    }

    /// See [`AppendLogStore::write_error`].
    pub fn write_error(&self, text: &str) -> StoreResult<()> {
        self.lock()?.write_error(text)
    }

    /// See [`AppendLogStore::medium_near_capacity`].
    pub fn medium_near_capacity(&self) -> bool {
        self.lock()
            .map(|store| store.medium_near_capacity())
            .unwrap_or(false)
    }

    /// Current lifecycle state
    pub fn state(&self) -> StoreResult<StoreState> {
        Ok(self.lock()?.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use crate::medium::MemoryDriver;
    use crate::store::StoreErrorCode;
    use std::thread;

    /// Console that panics on the first status line, while the lock is held.
    struct PanickingConsole;

    impl ConsoleReporter for PanickingConsole {
        fn report(&mut self, line: &str) {
            panic!("console failed on {:?}", line);
        }
    }

    #[test]
    fn test_concurrent_writers_lose_nothing() {
        let driver = MemoryDriver::new();
        let shared = SharedLogStore::new(AppendLogStore::new(driver.clone(), MemoryConsole::new()));
        assert!(shared.initialize_medium());
        assert!(shared.open_destinations());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        store.write_data(&format!("{},{}\n", t, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = driver.contents_string("/DATA.CSV");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 100);
        for t in 0..4 {
            for i in 0..25 {
                assert!(lines.contains(&format!("{},{}", t, i).as_str()));
            }
        }
        assert_eq!(driver.flush_count(), 100);
    }

    #[test]
    fn test_shared_state_and_stub() {
        let shared = SharedLogStore::new(AppendLogStore::new(MemoryDriver::new(), MemoryConsole::new()));
        assert_eq!(shared.state().unwrap(), StoreState::Uninitialized);
        assert!(!shared.medium_near_capacity());

        let err = shared.write_error("early").unwrap_err();
        assert!(err.to_string().contains("DRIFTER_STORE_NOT_READY"));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let shared = SharedLogStore::new(AppendLogStore::new(MemoryDriver::new(), PanickingConsole));

        let producer = shared.clone();
        let outcome = thread::spawn(move || producer.initialize_medium()).join();
        assert!(outcome.is_err());

        let err = shared.write_data("a").unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::LockPoisoned);
        assert!(err.is_fatal());
        assert!(shared.write_error("b").is_err());
        assert!(!shared.initialize_medium());
        assert!(!shared.open_destinations());
        assert!(shared.state().is_err());
    }
}
