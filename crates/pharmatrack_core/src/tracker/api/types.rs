//! Tracker API type definitions.
//!
//! Requests and responses of the three service layers, from the outside in:
//!
//! ## Dispatch API
//! A function name with a flat list of string arguments, as handed over by the host
//! runtime. Recognized names are `write`, `update`, `delete` and `fetch`.
//!
//! ## Lifecycle API
//! Named-field operations on asset records: create, append a trace event, delete,
//! fetch. This is where the existence rules are enforced.
//!
//! ## Ledger API
//! The key-value store capability the lifecycle manager is built on. Reading an
//! unknown key returns empty content, never an error.

use crate::tracker::infrastructure::{
    arguments::{NewAsset, TraceUpdate},
    asset::AssetRecord,
};

/// A routed invocation from the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Function name, matched exactly (`write`, `update`, `delete`, `fetch`)
    pub function: String,
    /// Positional arguments, see [`crate::tracker::infrastructure::arguments`]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self { function: function.into(), args }
    }
}

/// Result of a routed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResponse {
    /// Encoded asset record returned by `fetch`.
    Payload(Vec<u8>),

    /// Successful mutation, nothing to return.
    Empty,
}

/// Lifecycle operations on asset records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleRequest {
    /// Read the record stored under an id.
    ///
    /// Fails with `NotFound` when the ledger holds no record for that id.
    Fetch(String),

    /// Store a new record with a single seed trace event.
    ///
    /// Fails with `AlreadyExists` if the id is taken; an existing record is never
    /// overwritten.
    Create(NewAsset),

    /// Append one trace event at the end of an existing record's history.
    ///
    /// Never creates a record: fails with `NotExists` when the id is absent.
    AppendTraceEvent(TraceUpdate),

    /// Hard delete of an existing record, no tombstone is kept.
    Delete(String),
}

impl LifecycleRequest {
    /// Ledger key the request reads and mutates
    pub fn asset_id(&self) -> &str {
        match self {
            LifecycleRequest::Fetch(id) | LifecycleRequest::Delete(id) => id,
            LifecycleRequest::Create(asset) => &asset.asset_id,
            LifecycleRequest::AppendTraceEvent(update) => &update.asset_id,
        }
    }
}

/// Lifecycle operation results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleResponse {
    /// The record requested by `Fetch`.
    Asset(AssetRecord),

    /// Acknowledgment of a completed mutation.
    Ack,
}

/// Key-value store primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRequest {
    /// Read the value at a key, empty if unset.
    Get(String),

    /// Write a value at a key, replacing any previous value.
    Put { key: String, value: Vec<u8> },

    /// Remove a key.
    Delete(String),
}

/// Key-value store results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerResponse {
    /// Content read by `Get`, empty for an unset key.
    Value(Vec<u8>),

    /// Acknowledgment of `Put` or `Delete`.
    Ack,
}
