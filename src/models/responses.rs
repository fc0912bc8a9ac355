//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies. The control
//! replies use camelCase keys to match the wire contract the hosting page
//! expects.

use serde::Serialize;

/// Reply to `GET_CACHE_INFO`: entry counts per store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfoResponse {
    /// Entries in the current static store
    pub static_cache_size: usize,
    /// Entries in the current dynamic store
    pub dynamic_cache_size: usize,
    /// Sum of both
    pub total_size: usize,
}

/// Reply to `CLEAR_CACHE`.
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Always true once eradication has run
    pub success: bool,
}

/// Response body for the stats endpoint (GET /stats).
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache lookups that hit
    pub hits: u64,
    /// Number of cache lookups that missed
    pub misses: u64,
    /// Entries across every store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from aggregated store statistics.
    pub fn new(hits: u64, misses: u64, total_entries: usize) -> Self {
        let total_lookups = hits + misses;
        let hit_rate = if total_lookups > 0 {
            hits as f64 / total_lookups as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health).
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Worker lifecycle state label
    pub worker_state: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response with the current timestamp.
    pub fn healthy(worker_state: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            worker_state: worker_state.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
