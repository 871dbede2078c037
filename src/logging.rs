//! Console logging setup for binaries and tests.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the embedding application. This helper wires up a console
//! subscriber honoring the `MEDIALENS_LOG` filter variable.

use tracing_subscriber::EnvFilter;

/// Install a console subscriber. Safe to call more than once; subsequent
/// calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("MEDIALENS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
