use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use vnfin_core::TransportError;

/// JSON-over-POST transport for the VCI API (so tests can inject payloads).
///
/// VCI takes every request as a JSON body posted to `path`.
#[async_trait]
pub trait VciApi: Send + Sync {
    /// Post `body` to `path` and decode the answer.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

impl dyn VciApi {
    /// Build a `VciApi` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn VciApi>
    where
        F: Send + Sync + 'static + Fn(&str, &Value) -> Result<Value, TransportError>,
    {
        struct FnApi<F>(F);
        #[async_trait]
        impl<F> VciApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(&str, &Value) -> Result<Value, TransportError>,
        {
            async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
                (self.0)(path, body)
            }
        }
        Arc::new(FnApi(f))
    }
}
