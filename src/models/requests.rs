//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use serde::Deserialize;
use serde_json::Value;

/// A control message as posted by the hosting page (POST /control).
///
/// # Fields
/// - `type`: message type (`SKIP_WAITING`, `GET_CACHE_INFO`, `CLEAR_CACHE`)
/// - `data`: optional message payload; unused by the known types
#[derive(Debug, Clone, Deserialize)]
pub struct ControlRequest {
    /// The message type
    #[serde(rename = "type")]
    pub message_type: String,
    /// Optional payload
    #[serde(default)]
    pub data: Option<Value>,
}

/// Query parameters for the fetch endpoint (GET /fetch?url=...).
#[derive(Debug, Clone, Deserialize)]
pub struct FetchQuery {
    /// The URL to route through the worker
    pub url: String,
}
