//! Tracing setup for the `rhodus` binary
//!
//! Enable with `RUST_LOG=rhodus=debug` (session start/end, file loads) or
//! `RUST_LOG=rhodus=trace` (every token and statement). Nothing is installed
//! when `RUST_LOG` is unset.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
