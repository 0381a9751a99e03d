//! Telemetry helpers for hosts embedding `chart-hover`.
//!
//! Detector internals only emit `tracing` events; installing a subscriber is
//! left to the host. `init_default_tracing` covers the common case of a
//! compact stderr logger filtered through `RUST_LOG`.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Without `RUST_LOG`, detector events are shown at `debug` and everything
/// else at `warn`.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,chart_hover=debug"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
