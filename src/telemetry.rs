//! Telemetry helpers for dashboards embedding `chart-sync`.
//!
//! Propagation is logged through `tracing` only; this crate never installs a
//! subscriber on its own. Hosts either call one of the helpers below or wire
//! their own subscriber (for example with `RUST_LOG=chart_sync=debug`).

/// Directive used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "chart_sync=info";

/// Installs a compact fmt subscriber filtered by [`DEFAULT_TRACING_FILTER`].
///
/// See [`init_tracing_with_filter`] for the return value.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_TRACING_FILTER)
}

/// Installs a compact fmt subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` takes precedence over `fallback_filter`. Returns `false` when
/// the feature is disabled, when `fallback_filter` does not parse, or when the
/// host already set a global subscriber.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(fallback_filter) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };
        // Targets name the controller module that emitted each propagation record.
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
