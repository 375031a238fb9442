//! Diagnostics go to stderr so stdout only carries the progress lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging to stderr, filtered by `RUST_LOG`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
