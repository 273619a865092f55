//! Observability for drifter-sd
//!
//! Diagnostic logging goes through `tracing`; lifecycle points are typed
//! [`Event`]s so every log line for the same occurrence carries the same
//! name. This is separate from the console reporter, which is the
//! device's user-facing status channel.
//!
//! # Usage
//!
//! ```ignore
//! use drifter_sd::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::DestinationOpened, &[("path", "/DATA.CSV")]);
//! ```

mod events;

pub use events::Event;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Log a lifecycle event with fields
///
/// Failures go out at WARN, per-record events at DEBUG, everything else
/// at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = render_fields(fields);
    if event.is_failure() {
        warn!(event = event.as_str(), fields = %rendered);
    } else if event.is_per_record() {
        debug!(event = event.as_str(), fields = %rendered);
    } else {
        info!(event = event.as_str(), fields = %rendered);
    }
}

/// Render fields as `key=value` pairs in alphabetical key order.
fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Install the global fmt subscriber.
///
/// Writes to stderr so stdout stays the console channel. `RUST_LOG`
/// overrides `default_filter`. Calling it twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .try_init();
}

/// `RUST_LOG` if set and valid, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
