//! Error types for the cache gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Worker Error Enum ==
/// Unified error type for the worker and gateway.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Pre-caching of the static asset batch failed during install
    #[error("Install failed: {0}")]
    InstallFailed(String),

    /// Network fetch failed
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed request data (unparseable URL, bad method)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WorkerError::InstallFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            WorkerError::Network(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            WorkerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache gateway.
pub type Result<T> = std::result::Result<T, WorkerError>;
