//! API Handlers
//!
//! HTTP request handlers for the gateway endpoints. The fetch endpoint is
//! the interception point: every routed GET goes through the worker's
//! caching strategies.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::CachedResponse;
use crate::error::Result;
use crate::models::{ControlRequest, FetchQuery, HealthResponse, StatsResponse};
use crate::net::{ConnectivityProbe, FetchRequest, NetworkFetcher};
use crate::worker::Worker;

/// Application state shared across all handlers.
#[derive(Debug)]
pub struct AppState<N, C> {
    /// The cache worker
    pub worker: Arc<Worker<N, C>>,
}

impl<N, C> Clone for AppState<N, C> {
    fn clone(&self) -> Self {
        Self {
            worker: self.worker.clone(),
        }
    }
}

impl<N, C> AppState<N, C>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    /// Creates a new AppState around a worker.
    pub fn new(worker: Worker<N, C>) -> Self {
        Self {
            worker: Arc::new(worker),
        }
    }
}

/// Handler for GET /fetch?url=...
///
/// Routes the URL through the worker. Always produces a response; failures
/// surface as synthesized 503s, not errors.
pub async fn fetch_handler<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<FetchQuery>,
) -> Result<CachedResponse>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    let request = FetchRequest::get(&query.url)?;
    Ok(state.worker.handle_fetch(request).await)
}

/// Handler for POST /control
///
/// Dispatches a `{type, data}` control message. Replying message types
/// return their reply JSON; the rest acknowledge with 204.
pub async fn control_handler<N, C>(
    State(state): State<AppState<N, C>>,
    Json(request): Json<ControlRequest>,
) -> Response
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    match state.worker.deliver_wire(request).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handler for GET /stats
///
/// Returns lookup statistics aggregated across every store.
pub async fn stats_handler<N, C>(State(state): State<AppState<N, C>>) -> Json<StatsResponse>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    let stats = state.worker.stats().await;
    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.total_entries,
    ))
}

/// Handler for GET /health
pub async fn health_handler<N, C>(State(state): State<AppState<N, C>>) -> Json<HealthResponse>
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    let state_label = state.worker.state().await.label();
    Json(HealthResponse::healthy(state_label))
}
