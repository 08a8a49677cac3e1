//! Logging initialisation.
//!
//! The crate logs through [`tracing`]. Hosts that have no subscriber of
//! their own can install a formatted one filtered by `RUST_LOG`.

use crate::error::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when a global subscriber is already set.
pub fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::configuration(format!("logging already initialised: {}", e)))
}
