use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use vnfin_core::{Query, TransportError};

/// JSON-over-GET transport for the TCBS public API (so tests can inject payloads).
///
/// `path` is relative to the API root, e.g. `tcanalysis/v1/ticker/VCB/overview`.
#[async_trait]
pub trait TcbsApi: Send + Sync {
    /// Fetch and decode one resource.
    async fn get_json(&self, path: &str, query: &Query) -> Result<Value, TransportError>;
}

impl dyn TcbsApi {
    /// Build a `TcbsApi` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn TcbsApi>
    where
        F: Send + Sync + 'static + Fn(&str, &Query) -> Result<Value, TransportError>,
    {
        struct FnApi<F>(F);
        #[async_trait]
        impl<F> TcbsApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(&str, &Query) -> Result<Value, TransportError>,
        {
            async fn get_json(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
                (self.0)(path, query)
            }
        }
        Arc::new(FnApi(f))
    }
}
