//! Cache Module
//!
//! Named response stores and the registry that manages their lifecycle.

mod registry;
mod response;
mod stats;
mod store;

// Re-export public types
pub use registry::CacheRegistry;
pub use response::{
    current_timestamp_ms, CachedResponse, BODY_API_UNAVAILABLE, BODY_NETWORK_ERROR,
    BODY_OFFLINE, BODY_OFFLINE_MODE,
};
pub use stats::StoreStats;
pub use store::CacheStore;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the registry; every in-flight request and background
/// revalidation task operates through this.
pub type SharedRegistry = Arc<RwLock<CacheRegistry>>;

/// Creates a fresh shared registry.
pub fn shared_registry() -> SharedRegistry {
    Arc::new(RwLock::new(CacheRegistry::new()))
}
