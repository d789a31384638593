//! Tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG`; without it the crate logs at `debug` and
//! everything else at `info`.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,quill=debug,quill_core=debug";

/// Install the global subscriber. Later calls are no-ops, so tests and
/// embedders may call it freely.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
