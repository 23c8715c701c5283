//! Per-asset sequencing of lifecycle requests.
//!
//! Every lifecycle operation is a read-check-write over two or three ledger calls.
//! The ledger must isolate these calls per key; `MemoryLedger` does not, so this
//! layer serializes all requests targeting the same asset id before they reach the
//! lifecycle service. Requests on distinct ids still run concurrently.
//!
//! Isolation holds between clones of one stack, which share the reservation map.
//! Separately built stacks over the same ledger are not sequenced against each other.
use std::{future::Future, pin::Pin, sync::Arc, task::Poll};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tower::{Service, ServiceExt};
#[cfg(feature = "tracker_tracing")]
use tracing::debug;

use crate::tracker::{
    api::{LifecycleRequest, LifecycleResponse},
    error::TrackerError,
};

type ReservationMap = DashMap<String, Arc<Mutex<()>>>;

#[derive(Debug, Clone)]
pub struct SequencerService<S> {
    inner: S,
    reservations: Arc<ReservationMap>,
}

impl<S> SequencerService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, reservations: Arc::new(ReservationMap::new()) }
    }

    /// Number of asset ids currently reserved or waited on
    pub fn reserved(&self) -> usize {
        self.reservations.len()
    }
}

impl<S> Service<LifecycleRequest> for SequencerService<S>
where
    S: Service<LifecycleRequest, Response = LifecycleResponse, Error = TrackerError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = LifecycleResponse;
    type Error = TrackerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LifecycleRequest) -> Self::Future {
        let mut inner = self.inner.clone();
        let reservations = self.reservations.clone();
        let key = request.asset_id().to_owned();
        let reservation = Arc::clone(&reservations.entry(key.clone()).or_default());
        Box::pin(async move {
            let result = {
                let _guard = reservation.lock().await;
                #[cfg(feature = "tracker_tracing")]
                debug!("[sequencer] Reserved: asset_id: {}", key);
                match inner.ready().await {
                    Ok(service) => service.call(request).await,
                    Err(e) => Err(e),
                }
            };
            drop(reservation);
            // Only the map holds the lock once no request waits on it
            reservations.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
            result
        })
    }
}
