//! API Module
//!
//! HTTP handlers and routing for the gateway.
//!
//! # Endpoints
//! - `GET /fetch?url=...` - Route a request through the worker
//! - `POST /control` - Dispatch a `{type, data}` control message
//! - `GET /stats` - Aggregated cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
