//! Chain-of-custody tracking for physical assets.
//!
//! This crate records the provenance of assets (pharmaceutical packages, shipment
//! units, pallets) as they move through a supply chain. Each asset is stored as a
//! single JSON record in a generic key-value ledger, keyed by its asset id, and
//! carries an append-only trace history and a list of contained child assets.
//!
//! The ledger itself is an external collaborator reached through a [`tower::Service`]
//! seam, so the lifecycle rules (no overwrite on create, append-only history, delete
//! only after an existence check) can be exercised against any store that returns
//! empty content for unknown keys.

#[cfg(test)]
pub mod tests;

pub mod tracker;

#[cfg(feature = "tracker_tracing")]
pub mod tracker_tracing {
    use std::sync::Once;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: Once = Once::new();

    /// Install a fmt subscriber writing through the test harness, filtered by
    /// `RUST_LOG` and silent when it is unset. Safe to call from every test; only the
    /// first call installs. Binaries set up their own subscriber instead.
    pub fn init() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("off"));

            fmt()
                .with_target(false)
                .with_test_writer()
                .with_env_filter(filter)
                .init();
        });
    }
}
