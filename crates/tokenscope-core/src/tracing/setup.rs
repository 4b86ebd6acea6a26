//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tokenscope tracing/logging system.
///
/// Reads the `TOKENSCOPE_LOG` environment variable for per-module levels.
/// Format: `TOKENSCOPE_LOG=tokenscope_analysis=debug,tokenscope_session=info`
///
/// Falls back to `tokenscope=info` if `TOKENSCOPE_LOG` is not set or is invalid.
///
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TOKENSCOPE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tokenscope=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
