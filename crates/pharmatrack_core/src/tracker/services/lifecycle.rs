//! Provenance lifecycle manager.
//!
//! Enforces the lifecycle of an asset record over the ledger seam:
//!
//! ```text
//! ABSENT --Create--> EXISTS --AppendTraceEvent*--> EXISTS --Delete--> ABSENT
//! ```
//!
//! Each operation performs at most one ledger mutation, preceded by an existence
//! check. The service holds no state of its own besides the ledger handle;
//! isolation between concurrent operations on the same key is the ledger's job.
use std::{future::Future, pin::Pin, task::Poll};

use tower::{Service, ServiceExt};
#[cfg(feature = "tracker_tracing")]
use tracing::{debug, info};

use crate::tracker::{
    api::{LedgerRequest, LedgerResponse, LifecycleRequest, LifecycleResponse},
    error::TrackerError,
    infrastructure::{
        arguments::{NewAsset, TraceUpdate},
        asset::AssetRecord,
    },
    validation::FieldValidator,
};

/// Lifecycle service for asset records stored in a ledger
#[derive(Debug, Clone)]
pub struct LifecycleService<L> {
    ledger: L,
    validator: FieldValidator,
}

impl<L> LifecycleService<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger, validator: FieldValidator::default() }
    }

    /// Require non-empty classification and trace event fields
    pub fn with_field_validation(self, enable: bool) -> Self {
        Self { validator: FieldValidator::new(enable), ..self }
    }
}

impl<L> LifecycleService<L>
where
    L: Service<LedgerRequest, Response = LedgerResponse, Error = TrackerError>,
{
    /// Read and decode whatever the ledger holds under `key`.
    ///
    /// An unset key yields the zero-valued record, absence is left to the caller.
    async fn read(&mut self, key: &str) -> Result<AssetRecord, TrackerError> {
        let response = self
            .ledger
            .ready()
            .await
            .map_err(|e| read_failed(key, e))?
            .call(LedgerRequest::Get(key.to_owned()))
            .await
            .map_err(|e| read_failed(key, e))?;
        match response {
            LedgerResponse::Value(bytes) => AssetRecord::decode(&bytes),
            _ => Err(TrackerError::InternalTrackerError),
        }
    }

    async fn write(&mut self, record: &AssetRecord) -> Result<(), TrackerError> {
        let key = record.asset_id.as_str();
        let value = record.encode()?;
        let response = self
            .ledger
            .ready()
            .await
            .map_err(|e| write_failed(key, e))?
            .call(LedgerRequest::Put { key: key.to_owned(), value })
            .await
            .map_err(|e| write_failed(key, e))?;
        match response {
            LedgerResponse::Ack => Ok(()),
            _ => Err(TrackerError::InternalTrackerError),
        }
    }

    /// Get the record stored under `id`
    ///
    /// Fails with `NotFound` if the ledger holds nothing, or holds a record whose
    /// own id differs from `id`.
    async fn fetch(&mut self, id: &str) -> Result<AssetRecord, TrackerError> {
        self.validator.check_asset_id(id)?;
        let record = self.read(id).await?;
        if record.is_record_of(id) { Ok(record) } else { Err(TrackerError::NotFound(id.to_owned())) }
    }

    /// Store a new record, refusing to overwrite an existing one
    async fn create(&mut self, asset: NewAsset) -> Result<LifecycleResponse, TrackerError> {
        self.validator.check_new_asset(&asset)?;
        let existing = self.fetch(&asset.asset_id).await;
        match existing {
            Ok(_) => return Err(TrackerError::AlreadyExists(asset.asset_id)),
            Err(TrackerError::NotFound(_)) => {}
            // Unreadable content is not proof of absence
            Err(e) => return Err(e),
        }
        let record = AssetRecord::from(asset);
        #[cfg(feature = "tracker_tracing")]
        debug!("[lifecycle] New record: {:?}", record);
        self.write(&record).await?;
        Ok(LifecycleResponse::Ack)
    }

    /// Append a trace event to an existing record
    async fn append_trace_event(
        &mut self,
        update: TraceUpdate,
    ) -> Result<LifecycleResponse, TrackerError> {
        let TraceUpdate { asset_id, event } = update;
        self.validator.check_asset_id(&asset_id)?;
        self.validator.check_trace_event(&event)?;
        let mut record = self.read(&asset_id).await?;
        if !record.is_record_of(&asset_id) {
            return Err(TrackerError::NotExists(asset_id));
        }
        record.append_trace_event(event);
        #[cfg(feature = "tracker_tracing")]
        debug!(
            "[lifecycle] {} now has {} trace events",
            record.asset_id,
            record.trace_history.len()
        );
        self.write(&record).await?;
        Ok(LifecycleResponse::Ack)
    }

    /// Remove an existing record
    async fn delete(&mut self, id: String) -> Result<LifecycleResponse, TrackerError> {
        self.fetch(&id).await?;
        let response = self
            .ledger
            .ready()
            .await
            .map_err(|e| delete_failed(&id, e))?
            .call(LedgerRequest::Delete(id.clone()))
            .await
            .map_err(|e| delete_failed(&id, e))?;
        match response {
            LedgerResponse::Ack => Ok(LifecycleResponse::Ack),
            _ => Err(TrackerError::InternalTrackerError),
        }
    }
}

fn read_failed(key: &str, error: TrackerError) -> TrackerError {
    TrackerError::StoreReadFailed { key: key.to_owned(), reason: error.into_reason() }
}

fn write_failed(key: &str, error: TrackerError) -> TrackerError {
    TrackerError::StoreWriteFailed { key: key.to_owned(), reason: error.into_reason() }
}

fn delete_failed(key: &str, error: TrackerError) -> TrackerError {
    TrackerError::StoreDeleteFailed { key: key.to_owned(), reason: error.into_reason() }
}

impl<L> Service<LifecycleRequest> for LifecycleService<L>
where
    L: Service<LedgerRequest, Response = LedgerResponse, Error = TrackerError>
        + Clone
        + Send
        + 'static,
    L::Future: Send,
{
    type Response = LifecycleResponse;
    type Error = TrackerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LifecycleRequest) -> Self::Future {
        let mut this = self.clone();
        Box::pin(async move {
            match request {
                LifecycleRequest::Fetch(id) => {
                    #[cfg(feature = "tracker_tracing")]
                    info!("[lifecycle] Fetch: asset_id: {}", id);
                    this.fetch(&id).await.map(LifecycleResponse::Asset)
                }
                LifecycleRequest::Create(asset) => {
                    #[cfg(feature = "tracker_tracing")]
                    info!(
                        "[lifecycle] Create: asset_id: {}, children: {}",
                        asset.asset_id,
                        asset.children.len()
                    );
                    this.create(asset).await
                }
                LifecycleRequest::AppendTraceEvent(update) => {
                    #[cfg(feature = "tracker_tracing")]
                    info!(
                        "[lifecycle] AppendTraceEvent: asset_id: {}, owner: {}, status: {}",
                        update.asset_id, update.event.owner, update.event.status
                    );
                    this.append_trace_event(update).await
                }
                LifecycleRequest::Delete(id) => {
                    #[cfg(feature = "tracker_tracing")]
                    info!("[lifecycle] Delete: asset_id: {}", id);
                    this.delete(id).await
                }
            }
        })
    }
}
