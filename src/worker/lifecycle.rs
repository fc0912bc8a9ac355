//! Worker Lifecycle Module
//!
//! The worker itself: install-time pre-caching, activation pruning and the
//! fetch entry point. Mirrors the service-worker lifecycle: a new worker
//! installs, then activates and takes over request handling.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::{shared_registry, CachedResponse, SharedRegistry, StoreStats};
use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::net::{ConnectivityProbe, FetchRequest, NetworkFetcher};
use crate::routing::RequestRouter;

// == Lifecycle State ==
/// Worker lifecycle: install failure leaves the worker in `New` so the
/// caller can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, static store not yet populated
    New,
    /// Install succeeded, waiting to activate
    Installed,
    /// Active and claiming all requests
    Activated,
}

impl LifecycleState {
    /// Lower-case label for logging and health reporting.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleState::New => "new",
            LifecycleState::Installed => "installed",
            LifecycleState::Activated => "activated",
        }
    }
}

// == Worker ==
/// The cache worker: owns the store registry, the router and the lifecycle.
#[derive(Debug, Clone)]
pub struct Worker<N, C> {
    pub(super) config: Arc<WorkerConfig>,
    pub(super) registry: SharedRegistry,
    pub(super) network: N,
    pub(super) router: RequestRouter<N, C>,
    pub(super) state: Arc<RwLock<LifecycleState>>,
}

impl<N, C> Worker<N, C>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    /// Creates a worker in the `New` state with an empty registry.
    pub fn new(config: WorkerConfig, network: N, connectivity: C) -> Self {
        let config = Arc::new(config);
        let registry = shared_registry();
        let router = RequestRouter::new(
            config.clone(),
            registry.clone(),
            network.clone(),
            connectivity,
        );
        Self {
            config,
            registry,
            network,
            router,
            state: Arc::new(RwLock::new(LifecycleState::New)),
        }
    }

    /// The worker's configuration.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    // == Install ==
    /// Pre-populates the static store with the full asset allow-list.
    ///
    /// All-or-nothing: every asset is fetched first, and only a fully
    /// successful batch is committed. Any unreachable asset (including a
    /// non-success status) fails the install with nothing stored; the
    /// caller is expected to retry. The dynamic store is created empty.
    ///
    /// Returns the number of pre-cached assets.
    pub async fn install(&self) -> Result<usize> {
        let origin = self.config.app_origin.trim_end_matches('/');
        let mut batch = Vec::with_capacity(self.config.static_assets.len());

        for path in &self.config.static_assets {
            let request = FetchRequest::get(&format!("{}{}", origin, path))?;
            let response = self.network.fetch(&request).await.map_err(|e| {
                WorkerError::InstallFailed(format!("asset {} unreachable: {}", path, e))
            })?;
            if !response.is_success() {
                return Err(WorkerError::InstallFailed(format!(
                    "asset {} returned status {}",
                    path, response.status
                )));
            }
            batch.push((request.key(), response));
        }

        let count = batch.len();
        {
            let mut registry = self.registry.write().await;
            registry
                .open(&self.config.static_store_name())
                .put_batch(batch);
            registry.open(&self.config.dynamic_store_name());
        }
        *self.state.write().await = LifecycleState::Installed;

        info!(
            assets = count,
            store = %self.config.static_store_name(),
            "Install complete, static assets pre-cached"
        );
        Ok(count)
    }

    // == Activate ==
    /// Deletes every store whose name is not one of the two current store
    /// names, then marks the worker active. Returns the deleted names.
    pub async fn activate(&self) -> Vec<String> {
        let deleted = {
            let mut registry = self.registry.write().await;
            let stale: Vec<String> = registry
                .store_names()
                .into_iter()
                .filter(|name| !self.config.is_current_store(name))
                .collect();
            for name in &stale {
                registry.delete(name);
            }
            stale
        };
        *self.state.write().await = LifecycleState::Activated;

        info!(
            purged = deleted.len(),
            version = %self.config.cache_version,
            "Worker activated, stale stores purged"
        );
        deleted
    }

    /// Activates a waiting worker immediately. No effect unless the worker
    /// has installed and is waiting.
    pub async fn skip_waiting(&self) {
        if self.state().await == LifecycleState::Installed {
            info!("Skip-waiting requested, activating");
            self.activate().await;
        } else {
            warn!("Skip-waiting ignored: worker is not in the waiting state");
        }
    }

    // == Fetch ==
    /// Routes an intercepted request. Always produces a response.
    pub async fn handle_fetch(&self, request: FetchRequest) -> CachedResponse {
        self.router.route(request).await
    }

    // == Stats ==
    /// Aggregated lookup statistics across all stores.
    pub async fn stats(&self) -> StoreStats {
        self.registry.read().await.aggregate_stats()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::mock::{FixedProbe, MockNetwork};

    fn test_worker(online: bool) -> (Worker<MockNetwork, FixedProbe>, MockNetwork) {
        let network = MockNetwork::new();
        let worker = Worker::new(WorkerConfig::default(), network.clone(), FixedProbe(online));
        (worker, network)
    }

    fn serve_all_assets(network: &MockNetwork, config: &WorkerConfig) {
        let origin = config.app_origin.trim_end_matches('/');
        for path in &config.static_assets {
            network.serve(&format!("{}{}", origin, path), &format!("body of {}", path));
        }
    }

    #[tokio::test]
    async fn test_install_precaches_every_asset() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());

        let count = worker.install().await.unwrap();
        assert_eq!(count, worker.config().static_assets.len());
        assert_eq!(worker.state().await, LifecycleState::Installed);

        let registry = worker.registry.read().await;
        assert_eq!(registry.store_size("static-v1.2.0"), count);
        assert_eq!(registry.store_size("dynamic-v1.2.0"), 0);
        assert!(registry.get("dynamic-v1.2.0").is_some());
    }

    #[tokio::test]
    async fn test_install_is_all_or_nothing() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());
        network.drop_url("http://localhost:8080/data/words.json");

        let result = worker.install().await;
        assert!(matches!(result, Err(WorkerError::InstallFailed(_))));
        assert_eq!(worker.state().await, LifecycleState::New);

        // Nothing was partially committed
        assert!(worker.registry.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_install_fails_on_non_success_status() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());
        network.serve_response(
            "http://localhost:8080/manifest.json",
            CachedResponse::new(404, Vec::new(), Vec::new()),
        );

        let result = worker.install().await;
        assert!(matches!(result, Err(WorkerError::InstallFailed(_))));
        assert!(worker.registry.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_install_can_be_retried_after_failure() {
        let (worker, network) = test_worker(true);

        assert!(worker.install().await.is_err());

        serve_all_assets(&network, worker.config());
        assert!(worker.install().await.is_ok());
        assert_eq!(worker.state().await, LifecycleState::Installed);
    }

    #[tokio::test]
    async fn test_activate_purges_stale_stores() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());
        worker.install().await.unwrap();

        // Leftovers from a previous deployment
        {
            let mut registry = worker.registry.write().await;
            registry.open("static-v1.1.0");
            registry.open("dynamic-v1.1.0");
        }

        let mut deleted = worker.activate().await;
        deleted.sort();
        assert_eq!(deleted, vec!["dynamic-v1.1.0", "static-v1.1.0"]);
        assert_eq!(worker.state().await, LifecycleState::Activated);

        let registry = worker.registry.read().await;
        assert!(registry.get("static-v1.2.0").is_some());
        assert!(registry.get("dynamic-v1.2.0").is_some());
        assert!(registry.get("static-v1.1.0").is_none());
    }

    #[tokio::test]
    async fn test_skip_waiting_activates_waiting_worker() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());
        worker.install().await.unwrap();

        worker.skip_waiting().await;
        assert_eq!(worker.state().await, LifecycleState::Activated);
    }

    #[tokio::test]
    async fn test_skip_waiting_ignored_before_install() {
        let (worker, _network) = test_worker(true);
        worker.skip_waiting().await;
        assert_eq!(worker.state().await, LifecycleState::New);
    }

    #[tokio::test]
    async fn test_fetch_serves_precached_asset_offline() {
        let (worker, network) = test_worker(true);
        serve_all_assets(&network, worker.config());
        worker.install().await.unwrap();
        worker.activate().await;

        // Simulate going offline: the mock network stops serving
        network.drop_url("http://localhost:8080/index.html");

        let request = FetchRequest::get("http://localhost:8080/index.html").unwrap();
        let response = worker.handle_fetch(request).await;
        assert_eq!(response.body, b"body of /index.html");
    }
}
