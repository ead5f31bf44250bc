//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing/logging subscriber.
///
/// Reads the `RESILIA_LOG` environment variable for per-crate log levels,
/// e.g. `RESILIA_LOG=resilia_routing=debug,resilia_analysis=info`, and
/// falls back to `info` when it is unset or invalid.
///
/// Idempotent; repeated calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("RESILIA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
