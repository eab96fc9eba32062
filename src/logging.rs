//! Subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is up
//! to the binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used, falling back to
/// `warn` if it is not a valid filter directive. Common aliases such as
/// `WARNING` and `CRITICAL` are accepted.
pub fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(normalize_level(log_level)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

fn normalize_level(level: &str) -> String {
    match level.to_uppercase().as_str() {
        "WARNING" => "warn".to_string(),
        "CRITICAL" | "FATAL" => "error".to_string(),
        _ => level.to_lowercase(),
    }
}
