//! Core services of the tracker.
//!
//! - **Ledger**: in-process key-value store implementing the ledger seam
//! - **Lifecycle**: create, append, delete and fetch rules for asset records
//! - **Sequencer**: serializes lifecycle requests on the same asset id

pub mod ledger;
pub mod lifecycle;
pub mod sequencer;
