//! Cached Response Module
//!
//! Defines the stored representation of an HTTP response: status, headers,
//! body bytes and the time it was stored. Also provides the synthesized
//! 503-equivalent failure responses the routing handlers fall back to.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

// == Failure Bodies ==
/// Body of the 503 synthesized by the dynamic handler with no fallback.
pub const BODY_OFFLINE: &str = "Offline";
/// Body of the 503 synthesized by the static handler and the outer dispatch.
pub const BODY_NETWORK_ERROR: &str = "Network error";
/// Body of the 503 synthesized by the API handler.
pub const BODY_API_UNAVAILABLE: &str = "API unavailable";
/// Body of the 503 synthesized by the passthrough handler.
pub const BODY_OFFLINE_MODE: &str = "Offline mode";

// == Cached Response ==
/// A stored HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers as name/value pairs
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Vec<u8>,
    /// Time the response was stored (Unix milliseconds)
    pub stored_at: u64,
}

impl CachedResponse {
    /// Creates a new cached response stamped with the current time.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            stored_at: current_timestamp_ms(),
        }
    }

    /// Creates a plain 200 response, used when an upstream succeeds.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Vec::new(), body.into())
    }

    /// Creates a synthesized 503-equivalent failure response.
    ///
    /// The plain-text `body` identifies the handler the failure originated
    /// from (`"Offline"`, `"Network error"`, `"API unavailable"`,
    /// `"Offline mode"`).
    pub fn service_unavailable(body: &str) -> Self {
        Self::new(
            503,
            vec![("content-type".to_string(), "text/plain".to_string())],
            body.as_bytes().to_vec(),
        )
    }

    /// Returns true for 2xx statuses. Only successful responses are written
    /// into the cache stores.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if this is a synthesized service-unavailable response.
    pub fn is_unavailable(&self) -> bool {
        self.status == 503
    }

    /// Body interpreted as UTF-8, lossy. Diagnostic use.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        let mut response = Response::new(self.body.into());
        *response.status_mut() = status;
        for (name, value) in &self.headers {
            // Headers that fail to parse are dropped rather than failing the response
            if let (Ok(name), Ok(value)) = (
                name.parse::<HeaderName>(),
                HeaderValue::from_str(value),
            ) {
                if name != header::TRANSFER_ENCODING {
                    response.headers_mut().insert(name, value);
                }
            }
        }
        response
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
