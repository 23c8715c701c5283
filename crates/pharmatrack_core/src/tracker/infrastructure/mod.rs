//! Infrastructure components for the tracker.
//!
//! - **Asset**: the ledger record model and its JSON encoding
//! - **Arguments**: positional invocation arguments decoded into named fields

pub mod arguments;
pub mod asset;
