//! Request Router Module
//!
//! Intercepts GET requests, classifies them and applies the per-class
//! cache-vs-network policy. Any handler failure is converted into a
//! synthesized 503-equivalent response; nothing propagates to the caller as
//! an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{
    CachedResponse, SharedRegistry, BODY_API_UNAVAILABLE, BODY_NETWORK_ERROR, BODY_OFFLINE,
    BODY_OFFLINE_MODE,
};
use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::net::{ConnectivityProbe, FetchRequest, NetworkFetcher};
use crate::routing::{classify, RouteClass};
use crate::tasks::spawn_revalidation;

// == Request Router ==
/// Routes intercepted requests through the per-class caching strategies.
#[derive(Debug, Clone)]
pub struct RequestRouter<N, C> {
    config: Arc<WorkerConfig>,
    registry: SharedRegistry,
    network: N,
    connectivity: C,
}

impl<N, C> RequestRouter<N, C>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe,
{
    /// Creates a router over the shared registry and injected capabilities.
    pub fn new(
        config: Arc<WorkerConfig>,
        registry: SharedRegistry,
        network: N,
        connectivity: C,
    ) -> Self {
        Self {
            config,
            registry,
            network,
            connectivity,
        }
    }

    // == Dispatch ==
    /// Routes one request and always produces a response.
    ///
    /// Non-GET methods bypass classification and go straight to the network.
    /// A handler error becomes a generic 503 rather than reaching the caller.
    pub async fn route(&self, request: FetchRequest) -> CachedResponse {
        if !request.is_get() {
            return self.passthrough(&request).await;
        }

        let class = classify(&self.config, &request.url);
        debug!(url = %request.url, class = class.label(), "Routing request");

        let result = match class {
            RouteClass::Static => self.handle_static(&request).await,
            RouteClass::Dynamic => self.handle_dynamic(&request).await,
            RouteClass::Api => self.handle_api(&request).await,
            RouteClass::Other => self.handle_other(&request).await,
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %request.url, class = class.label(), error = %e, "Handler failed");
                CachedResponse::service_unavailable(BODY_NETWORK_ERROR)
            }
        }
    }

    // == Static Handler ==
    /// Cache-first with stale-while-revalidate.
    ///
    /// A hit is served immediately; when online, a detached refetch updates
    /// the entry in the background. A miss goes to the network and the
    /// result is stored on success.
    async fn handle_static(&self, request: &FetchRequest) -> Result<CachedResponse> {
        let store_name = self.config.static_store_name();
        let key = request.key();

        let cached = self.registry.write().await.open(&store_name).lookup(&key);
        if let Some(response) = cached {
            if self.connectivity.is_online() {
                // Fire-and-forget: the served response is already decided
                spawn_revalidation(
                    self.registry.clone(),
                    self.network.clone(),
                    store_name,
                    request.clone(),
                );
            }
            return Ok(response);
        }

        if !self.connectivity.is_online() {
            return Ok(CachedResponse::service_unavailable(BODY_NETWORK_ERROR));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.registry
                        .write()
                        .await
                        .open(&store_name)
                        .put(key, response.clone());
                }
                Ok(response)
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "Static fetch failed");
                Ok(CachedResponse::service_unavailable(BODY_NETWORK_ERROR))
            }
        }
    }

    // == Dynamic Handler ==
    /// Network-first with cache fallback.
    ///
    /// Online: fetch, store on success, fall back to cache on failure and
    /// propagate when no fallback exists. Offline: cached entry or 503.
    async fn handle_dynamic(&self, request: &FetchRequest) -> Result<CachedResponse> {
        let store_name = self.config.dynamic_store_name();
        let key = request.key();

        if !self.connectivity.is_online() {
            let cached = self.registry.write().await.open(&store_name).lookup(&key);
            return Ok(cached
                .unwrap_or_else(|| CachedResponse::service_unavailable(BODY_OFFLINE)));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.registry
                        .write()
                        .await
                        .open(&store_name)
                        .put(key, response.clone());
                }
                Ok(response)
            }
            Err(e) => {
                let cached = self.registry.write().await.open(&store_name).lookup(&key);
                match cached {
                    Some(response) => {
                        debug!(url = %request.url, "Dynamic fetch failed, serving cached copy");
                        Ok(response)
                    }
                    None => Err(WorkerError::Network(e.to_string())),
                }
            }
        }
    }

    // == API Handler ==
    /// Network-only; API responses are never cached. Upstream error statuses
    /// pass through untouched.
    async fn handle_api(&self, request: &FetchRequest) -> Result<CachedResponse> {
        if !self.connectivity.is_online() {
            return Ok(CachedResponse::service_unavailable(BODY_API_UNAVAILABLE));
        }

        match self.network.fetch(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(url = %request.url, error = %e, "API fetch failed");
                Ok(CachedResponse::service_unavailable(BODY_API_UNAVAILABLE))
            }
        }
    }

    // == Other Handler ==
    /// Network-only passthrough for unclassified requests.
    async fn handle_other(&self, request: &FetchRequest) -> Result<CachedResponse> {
        if !self.connectivity.is_online() {
            return Ok(CachedResponse::service_unavailable(BODY_OFFLINE_MODE));
        }

        match self.network.fetch(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(url = %request.url, error = %e, "Passthrough fetch failed");
                Ok(CachedResponse::service_unavailable(BODY_OFFLINE_MODE))
            }
        }
    }

    // == Non-GET Passthrough ==
    async fn passthrough(&self, request: &FetchRequest) -> CachedResponse {
        match self.network.fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %request.url, method = %request.method, error = %e, "Passthrough failed");
                CachedResponse::service_unavailable(BODY_NETWORK_ERROR)
            }
        }
    }
}
