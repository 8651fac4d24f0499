//! Tracing subscriber set-up for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to `default_filter`
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install a global fmt subscriber writing to stderr.
///
/// Stdout is kept free for the report. Calling this twice is a no-op.
pub fn init_tracing(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
