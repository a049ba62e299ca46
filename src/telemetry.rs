//! Tracing bootstrap for binaries and examples embedding the crate.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the host's choice. [`init`] wires up the conventional fmt subscriber
//! with `RUST_LOG`-style filtering for hosts that don't bring their own.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Subscriber installation failed, usually because one is already set.
#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call when a subscriber may already be installed — the error is
/// returned, not panicked, so tests and embedders can ignore it.
pub fn init() -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| TelemetryError(e.to_string()))
}
