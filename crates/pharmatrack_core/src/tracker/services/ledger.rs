//! In-process ledger.
//!
//! Implements the key-value store capability on top of a shared `DashMap`. Like the
//! production ledger it stands in for, reading an unknown key yields empty content
//! rather than an error, and deleting an unknown key succeeds.
use std::{future::Future, pin::Pin, sync::Arc, task::Poll};

use dashmap::DashMap;
use tower::Service;
#[cfg(feature = "tracker_tracing")]
use tracing::debug;

use crate::tracker::{
    api::{LedgerRequest, LedgerResponse},
    error::TrackerError,
};

type StateMap = DashMap<String, Vec<u8>>;

/// Ledger keeping world state in memory, shared between clones
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    state: Arc<StateMap>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Raw content at a key, empty if unset
    pub fn raw(&self, key: &str) -> Vec<u8> {
        self.state.get(key).map(|value| value.to_owned()).unwrap_or_default()
    }

    /// Set a raw value, bypassing the lifecycle rules.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.state.insert(key.into(), value.into());
    }
}

impl Service<LedgerRequest> for MemoryLedger {
    type Response = LedgerResponse;
    type Error = TrackerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LedgerRequest) -> Self::Future {
        let state = self.state.clone();
        Box::pin(async move {
            match request {
                LedgerRequest::Get(key) => {
                    #[cfg(feature = "tracker_tracing")]
                    debug!("[ledger] Get: key: {}", key);
                    Ok(LedgerResponse::Value(
                        state.get(&key).map(|value| value.to_owned()).unwrap_or_default(),
                    ))
                }
                LedgerRequest::Put { key, value } => {
                    #[cfg(feature = "tracker_tracing")]
                    debug!("[ledger] Put: key: {}, {} bytes", key, value.len());
                    state.insert(key, value);
                    Ok(LedgerResponse::Ack)
                }
                LedgerRequest::Delete(key) => {
                    #[cfg(feature = "tracker_tracing")]
                    debug!("[ledger] Delete: key: {}", key);
                    state.remove(&key);
                    Ok(LedgerResponse::Ack)
                }
            }
        })
    }
}
