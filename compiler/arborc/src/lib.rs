//! Arbor command line library.
//!
//! The `arbor` binary is a thin argument dispatcher over [`commands`]; the
//! commands return [`CommandResult`]s so they can be driven from tests.

use std::sync::Once;

pub mod commands;
mod error;

pub use error::{CommandError, CommandResult};

static TRACING_INIT: Once = Once::new();

/// Install a log subscriber if `RUST_LOG` is set.
///
/// Logs go to stderr so program output on stdout stays clean. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

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
