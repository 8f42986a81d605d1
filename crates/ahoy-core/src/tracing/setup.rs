//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults;

static INIT: Once = Once::new();

/// Initialize the Ahoy tracing/logging system.
///
/// Reads the `AHOY_LOG` environment variable for per-module log levels.
/// Format: `AHOY_LOG=ahoy_client=debug,ahoy_tokens=info`
///
/// Falls back to `ahoy=info` if `AHOY_LOG` is not set or is invalid.
///
/// This function is idempotent; a subscriber installed elsewhere is left alone.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Initialize tracing with a custom filter string and JSON output (for
/// embedding in services that ship structured logs).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}
