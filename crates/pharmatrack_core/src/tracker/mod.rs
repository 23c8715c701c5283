//! Tracker module.
//!
//! Records the chain of custody and composition of physical assets on top of a
//! generic key-value ledger.
//!
//! ## Core Architecture
//!
//! Three service layers, each a [`tower::Service`] with its own request enum:
//!
//! ### Dispatch
//! Receives a function name and positional string arguments from the host runtime,
//! checks the argument count and builds a named-field lifecycle request.
//!
//! ### Lifecycle
//! Enforces the rules on asset records: a record is created once and never
//! overwritten, its trace history only grows, and it is deleted only after an
//! existence check. A sequencer in front of it runs requests on the same asset
//! id one at a time, so these read-check-write rules hold under concurrency.
//!
//! ### Ledger
//! Durable key-value storage, external to this crate. [`services::ledger::MemoryLedger`]
//! implements it in memory for tests and local sessions.
//!
//! ## Default Service Stack
//!
//! [`TrackerDefaultStack`] wires the three layers together, see [`init_tracker`].
pub mod api;
pub mod dispatch;
pub mod error;
pub mod infrastructure;
pub mod services;
pub mod validation;

/// Standard tracker stack parameterized by ledger type.
pub type TrackerDefaultStack<L> = dispatch::DispatchService<
    services::sequencer::SequencerService<services::lifecycle::LifecycleService<L>>,
>;

/// Initialize a tracker over the given ledger.
///
/// Only the asset id is validated; other fields are accepted as given.
pub fn init_tracker<L>(ledger: L) -> TrackerDefaultStack<L>
where
    L: tower::Service<
            api::LedgerRequest,
            Response = api::LedgerResponse,
            Error = error::TrackerError,
        > + Clone
        + Send
        + 'static,
    L::Future: Send,
{
    build_tracker(ledger, false)
}

/// Initialize a tracker with strict field validation.
///
/// Classification and trace event fields must be non-empty in addition to the
/// asset id.
pub fn init_tracker_with_validation<L>(ledger: L) -> TrackerDefaultStack<L>
where
    L: tower::Service<
            api::LedgerRequest,
            Response = api::LedgerResponse,
            Error = error::TrackerError,
        > + Clone
        + Send
        + 'static,
    L::Future: Send,
{
    build_tracker(ledger, true)
}

fn build_tracker<L>(ledger: L, field_validation: bool) -> TrackerDefaultStack<L> {
    let lifecycle = tower::ServiceBuilder::new()
        .layer(tower::layer::layer_fn(services::sequencer::SequencerService::new))
        .service(
            services::lifecycle::LifecycleService::new(ledger)
                .with_field_validation(field_validation),
        );
    dispatch::DispatchService::new(lifecycle)
}
