//! Logging initialization for binaries embedding the engine
//!
//! The library itself only emits `tracing` events; hosts decide where they
//! go. This helper wires up the standard fmt subscriber with an env-driven
//! filter for the demo binary and for ad-hoc debugging in tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize console logging.
///
/// Configuration via environment variables:
/// - RUST_LOG: log level filter (default: info)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
