//! Invocation router.
//!
//! Maps a function name and its positional arguments onto a lifecycle request.
//! Argument counts are checked here, before the ledger is touched, so a malformed
//! invocation never reaches the store.
//!
//! | function | lifecycle operation | arguments |
//! |----------|---------------------|-----------|
//! | `write`  | `Create`            | 16, then `(childAssetId, childAssetType)` pairs |
//! | `update` | `AppendTraceEvent`  | 6 |
//! | `delete` | `Delete`            | 1 |
//! | `fetch`  | `Fetch`             | 1 |
use std::{future::Future, pin::Pin, task::Poll};

use tower::{Service, ServiceExt};
#[cfg(feature = "tracker_tracing")]
use tracing::{info, warn};

use crate::tracker::{
    api::{Invocation, InvocationResponse, LifecycleRequest, LifecycleResponse},
    error::{Arity, TrackerError},
    infrastructure::arguments::{
        CREATE_FIELD_COUNT, NewAsset, TraceUpdate, UPDATE_FIELD_COUNT, single_id,
    },
};

/// Recognized function names with the number of arguments they take.
pub const FUNCTIONS: [(&str, Arity); 4] = [
    ("write", Arity::AtLeastThenPairs(CREATE_FIELD_COUNT)),
    ("update", Arity::Exactly(UPDATE_FIELD_COUNT)),
    ("delete", Arity::Exactly(1)),
    ("fetch", Arity::Exactly(1)),
];

/// Dispatch service
///
/// Entry point of the tracker: one instance is built at startup and every
/// invocation is routed through it.
#[derive(Debug, Clone)]
pub struct DispatchService<T> {
    lifecycle: T,
}

impl<T> DispatchService<T> {
    pub fn new(lifecycle: T) -> Self {
        Self { lifecycle }
    }
}

impl<T> DispatchService<T>
where
    T: Service<LifecycleRequest, Response = LifecycleResponse, Error = TrackerError>,
{
    async fn route(&mut self, invocation: Invocation) -> Result<InvocationResponse, TrackerError> {
        let Invocation { function, args } = invocation;
        let request = match function.as_str() {
            "write" => LifecycleRequest::Create(NewAsset::from_args(&function, args)?),
            "update" => LifecycleRequest::AppendTraceEvent(TraceUpdate::from_args(&function, args)?),
            "delete" => LifecycleRequest::Delete(single_id(&function, args)?),
            "fetch" => LifecycleRequest::Fetch(single_id(&function, args)?),
            _ => return Err(TrackerError::UnknownFunction(function)),
        };
        match self.lifecycle.ready().await?.call(request).await? {
            LifecycleResponse::Asset(record) => Ok(InvocationResponse::Payload(record.encode()?)),
            LifecycleResponse::Ack => Ok(InvocationResponse::Empty),
        }
    }
}

impl<T> Service<Invocation> for DispatchService<T>
where
    T: Service<LifecycleRequest, Response = LifecycleResponse, Error = TrackerError>
        + Clone
        + Send
        + 'static,
    T::Future: Send,
{
    type Response = InvocationResponse;
    type Error = TrackerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, invocation: Invocation) -> Self::Future {
        let mut this = self.clone();
        Box::pin(async move {
            #[cfg(feature = "tracker_tracing")]
            info!(
                "[dispatch] {}: {} argument(s)",
                invocation.function,
                invocation.args.len()
            );
            let result = this.route(invocation).await;
            #[cfg(feature = "tracker_tracing")]
            let result = result.inspect_err(|e| warn!("[dispatch] {}", e));
            result
        })
    }
}
