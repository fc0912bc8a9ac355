//! API Routes
//!
//! Configures the Axum router with the gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    control_handler, fetch_handler, health_handler, stats_handler, AppState,
};
use crate::net::{ConnectivityProbe, NetworkFetcher};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /fetch?url=...` - Route a request through the worker
/// - `POST /control` - Dispatch a control message
/// - `GET /stats` - Aggregated cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router<N, C>(state: AppState<N, C>) -> Router
where
    N: NetworkFetcher + Clone,
    C: ConnectivityProbe + Clone,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/fetch", get(fetch_handler::<N, C>))
        .route("/control", post(control_handler::<N, C>))
        .route("/stats", get(stats_handler::<N, C>))
        .route("/health", get(health_handler::<N, C>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
