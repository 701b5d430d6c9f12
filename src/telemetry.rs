//! Telemetry helpers for applications embedding `figure-rs`.
//!
//! The library emits `tracing` events at these points:
//!
//! - `debug`: subplot grid creation (`rows`, `cols`, `has_secondary_y`) and
//!   each merge into a grid cell (`row`, `col`, `secondary_y`, `trace_count`).
//! - `debug`: legend label synthesis (`label`, `rank`) and secondary y axis creation.
//! - `debug`: render context resolution, the applied margin policy, and which
//!   finalize branch ran (export document or renderer hand-off).
//! - `debug`: installing a global theme.
//! - `trace`: command-location overlay placement and figure wrapping.
//! - `warn`: the embedded dark theme failing to parse.
//!
//! Tracing setup stays explicit and opt-in. Hosts can call
//! `init_default_tracing` or install their own `tracing` subscriber.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or the host application
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
