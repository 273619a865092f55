//! Store lifecycle tests
//!
//! Bind, open and write ordering of AppendLogStore, including the
//! partial-open and failed-bind paths, driven through the in-memory card.

use drifter_sd::console::MemoryConsole;
use drifter_sd::medium::MemoryDriver;
use drifter_sd::store::{
    AppendLogStore, Destination, StoreErrorCode, StoreState, BIND_FAILED_NOTICE,
    INITIALIZED_NOTICE,
};

// =============================================================================
// Test Utilities
// =============================================================================

fn new_store() -> (AppendLogStore<MemoryDriver, MemoryConsole>, MemoryDriver, MemoryConsole) {
    let driver = MemoryDriver::new();
    let console = MemoryConsole::new();
    let store = AppendLogStore::new(driver.clone(), console.clone());
    (store, driver, console)
}

// =============================================================================
// Medium binding
// =============================================================================

/// A card that does not respond leaves the store unusable.
#[test]
fn test_unreachable_medium_leaves_store_unusable() {
    let (mut store, driver, console) = new_store();
    driver.fail_bind();

    assert!(!store.initialize_medium());
    assert_eq!(store.state(), StoreState::Uninitialized);
    assert_eq!(console.lines(), vec![BIND_FAILED_NOTICE]);

    assert!(!store.open_destinations());
    assert!(store.write_data("1,2\n").is_err());
    assert!(store.write_error("boom").is_err());

    assert!(driver.open_attempts().is_empty());
    assert_eq!(driver.contents("/DATA.CSV"), None);
    assert_eq!(driver.contents("/ERRORS.TXT"), None);
}

/// Exactly one console status line per bind attempt.
#[test]
fn test_bind_emits_one_status_line() {
    let (mut store, _driver, console) = new_store();
    assert!(store.initialize_medium());
    assert_eq!(console.len(), 1);
    assert_eq!(console.lines()[0], INITIALIZED_NOTICE);
}

// =============================================================================
// Destination opening
// =============================================================================

/// Data open failure: distinct notice, error destination never attempted.
#[test]
fn test_data_open_failure_does_not_attempt_error_destination() {
    let (mut store, driver, console) = new_store();
    driver.fail_open("/DATA.CSV");

    assert!(store.initialize_medium());
    assert!(!store.open_destinations());

    assert_eq!(driver.open_attempts(), vec!["/DATA.CSV"]);
    assert_eq!(console.lines(), vec![INITIALIZED_NOTICE, "Couldn't open log file"]);
}

/// Error open failure: false, data destination stays open.
#[test]
fn test_error_open_failure_leaves_data_open() {
    let (mut store, driver, console) = new_store();
    driver.fail_open("/ERRORS.TXT");

    assert!(store.initialize_medium());
    assert!(!store.open_destinations());

    assert!(store.is_open(Destination::Data));
    assert!(!store.is_open(Destination::Error));
    assert_eq!(console.lines(), vec![INITIALIZED_NOTICE, "Couldn't open error file"]);
    // The data file was created by the open and is not removed.
    assert_eq!(driver.contents("/DATA.CSV"), Some(Vec::new()));
}

/// Distinct failure messages for the two destinations.
#[test]
fn test_open_failure_messages_are_distinct() {
    let (mut data_store, data_driver, data_console) = new_store();
    data_driver.fail_open("/DATA.CSV");
    data_store.initialize_medium();
    data_store.open_destinations();

    let (mut error_store, error_driver, error_console) = new_store();
    error_driver.fail_open("/ERRORS.TXT");
    error_store.initialize_medium();
    error_store.open_destinations();

    assert_ne!(data_console.lines().last(), error_console.lines().last());
}

// =============================================================================
// Out-of-order calls
// =============================================================================

/// Writes before DestinationsOpen fail fast and write nothing.
#[test]
fn test_write_before_open_is_rejected() {
    let (mut store, driver, _console) = new_store();

    let err = store.write_data("early").unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::NotReady);

    store.initialize_medium();
    let err = store.write_error("still early").unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::NotReady);
    assert!(err.to_string().contains("MEDIUM_READY"));

    assert_eq!(driver.flush_count(), 0);
}

/// State only moves forward.
#[test]
fn test_state_transitions_are_one_directional() {
    let (mut store, _driver, _console) = new_store();
    assert_eq!(store.state(), StoreState::Uninitialized);

    store.initialize_medium();
    assert_eq!(store.state(), StoreState::MediumReady);

    store.open_destinations();
    assert_eq!(store.state(), StoreState::DestinationsOpen);

    assert!(!store.initialize_medium());
    assert_eq!(store.state(), StoreState::DestinationsOpen);
}

// =============================================================================
// Capacity
// =============================================================================

/// The capacity check is a stub and always reports false.
#[test]
fn test_medium_near_capacity_always_false() {
    let (mut store, _driver, _console) = new_store();
    assert!(!store.medium_near_capacity());

    store.initialize_medium();
    store.open_destinations();
    let big = "x".repeat(64 * 1024);
    for _ in 0..16 {
        store.write_data(&big).unwrap();
    }
    assert!(!store.medium_near_capacity());
}
