//! Tracing subscriber setup
//!
//! Kernels only emit `tracing` events; binaries, benches and tests that want
//! to see them call [`init`] once.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    init_with_default("info")
}

/// Like [`init`], with a fallback directive used when `RUST_LOG` is unset.
pub fn init_with_default(directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
