//! Control Channel Module
//!
//! The message-based control surface the hosting page drives the worker
//! with. Messages arrive as `{type, data}`; replies are delivered through a
//! oneshot channel rather than a direct return value. Unrecognized types
//! are logged and ignored.

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::models::{CacheInfoResponse, ClearCacheResponse, ControlRequest};
use crate::net::{ConnectivityProbe, NetworkFetcher};
use crate::worker::Worker;

// == Control Message ==
/// A parsed control message, carrying its reply channel where one applies.
#[derive(Debug)]
pub enum ControlMessage {
    /// Activate a waiting worker immediately. No reply.
    SkipWaiting,
    /// Report per-store entry counts.
    GetCacheInfo {
        reply: oneshot::Sender<CacheInfoResponse>,
    },
    /// Delete every named store.
    ClearCache {
        reply: oneshot::Sender<ClearCacheResponse>,
    },
}

impl<N, C> Worker<N, C>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    // == Deliver ==
    /// Processes one control message, sending any reply through the
    /// message's channel. A dropped receiver is not an error.
    pub async fn deliver(&self, message: ControlMessage) {
        match message {
            ControlMessage::SkipWaiting => {
                self.skip_waiting().await;
            }
            ControlMessage::GetCacheInfo { reply } => {
                let _ = reply.send(self.cache_info().await);
            }
            ControlMessage::ClearCache { reply } => {
                let removed = self.registry.write().await.clear_all();
                info!(stores = removed, "Cache eradicated on request");
                let _ = reply.send(ClearCacheResponse { success: true });
            }
        }
    }

    // == Wire Dispatch ==
    /// Dispatches a raw `{type, data}` control request, returning the reply
    /// payload for the message types that produce one.
    pub async fn deliver_wire(&self, request: ControlRequest) -> Option<Value> {
        match request.message_type.as_str() {
            "SKIP_WAITING" => {
                self.deliver(ControlMessage::SkipWaiting).await;
                None
            }
            "GET_CACHE_INFO" => {
                let (tx, rx) = oneshot::channel();
                self.deliver(ControlMessage::GetCacheInfo { reply: tx }).await;
                rx.await.ok().and_then(|info| serde_json::to_value(info).ok())
            }
            "CLEAR_CACHE" => {
                let (tx, rx) = oneshot::channel();
                self.deliver(ControlMessage::ClearCache { reply: tx }).await;
                rx.await.ok().and_then(|outcome| serde_json::to_value(outcome).ok())
            }
            unknown => {
                warn!(message_type = unknown, "Ignoring unknown control message");
                None
            }
        }
    }

    // == Cache Info ==
    /// Entry counts for the two current stores.
    pub async fn cache_info(&self) -> CacheInfoResponse {
        let registry = self.registry.read().await;
        let static_cache_size = registry.store_size(&self.config.static_store_name());
        let dynamic_cache_size = registry.store_size(&self.config.dynamic_store_name());
        CacheInfoResponse {
            static_cache_size,
            dynamic_cache_size,
            total_size: static_cache_size + dynamic_cache_size,
        }
    }
}
