//! Network Module
//!
//! The worker's two injected capabilities: the upstream fetcher and the
//! connectivity probe. Both are traits so tests can simulate network
//! success, failure and offline conditions deterministically.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use url::Url;

use crate::cache::CachedResponse;
use crate::error::{Result, WorkerError};

// == Fetch Request ==
/// An intercepted request: method plus parsed URL.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// HTTP method, upper-case ("GET", "POST", ...)
    pub method: String,
    /// Parsed request URL
    pub url: Url,
}

impl FetchRequest {
    /// Builds a request from a method and URL string.
    pub fn new(method: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| WorkerError::InvalidRequest(format!("Bad URL '{}': {}", url, e)))?;
        Ok(Self {
            method: method.to_uppercase(),
            url,
        })
    }

    /// Builds a GET request from a URL string.
    pub fn get(url: &str) -> Result<Self> {
        Self::new("GET", url)
    }

    /// Returns true for GET requests; only these are routed through the
    /// cache strategies.
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    /// The store key for this request: method plus full URL.
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

// == Network Fetcher ==
/// Upstream fetch capability.
pub trait NetworkFetcher: Send + Sync + 'static {
    /// Performs the request against the real network.
    ///
    /// An `Err` means the fetch itself failed (unreachable host, connection
    /// reset). Upstream HTTP error statuses are returned as `Ok` responses,
    /// matching browser fetch semantics.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<CachedResponse>> + Send;
}

// == Connectivity Probe ==
/// Best-effort online/offline hint, read once per request.
///
/// A `true` reading does not guarantee a fetch will succeed; handlers treat
/// a failed fetch while "online" the same as a network failure.
pub trait ConnectivityProbe: Send + Sync + 'static {
    /// Current connectivity reading.
    fn is_online(&self) -> bool;
}

// == HTTP Fetcher ==
/// Production fetcher backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NetworkFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<CachedResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| WorkerError::InvalidRequest(format!("Bad method: {}", request.method)))?;

        let response = self
            .client
            .request(method, request.url.clone())
            .send()
            .await
            .map_err(|e| WorkerError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| WorkerError::Network(e.to_string()))?;

        Ok(CachedResponse::new(status, headers, body.to_vec()))
    }
}

// == Online Flag ==
/// Togglable connectivity flag, the gateway's stand-in for the browser's
/// connectivity indicator.
#[derive(Debug, Clone)]
pub struct OnlineFlag {
    online: Arc<AtomicBool>,
}

impl OnlineFlag {
    /// Creates a flag with the given initial reading.
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Creates a flag reporting online.
    pub fn online() -> Self {
        Self::new(true)
    }

    /// Updates the reading.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivityProbe for OnlineFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}


// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key_includes_method_and_url() {
        let req = FetchRequest::get("http://localhost:8080/index.html").unwrap();
        assert_eq!(req.key(), "GET http://localhost:8080/index.html");
        assert!(req.is_get());
    }

    #[test]
    fn test_method_is_normalized() {
        let req = FetchRequest::new("post", "http://localhost/api/scores").unwrap();
        assert_eq!(req.method, "POST");
        assert!(!req.is_get());
    }

    #[test]
    fn test_bad_url_is_rejected() {
        let result = FetchRequest::get("not a url");
        assert!(matches!(result, Err(WorkerError::InvalidRequest(_))));
    }

    #[test]
    fn test_online_flag_toggles() {
        let flag = OnlineFlag::online();
        assert!(flag.is_online());
        flag.set_online(false);
        assert!(!flag.is_online());
    }

    #[tokio::test]
    async fn test_mock_network_serves_and_fails() {
        let network = mock::MockNetwork::new();
        network.serve("http://localhost/app.js", "console.log(1)");

        let ok = network
            .fetch(&FetchRequest::get("http://localhost/app.js").unwrap())
            .await
            .unwrap();
        assert_eq!(ok.body, b"console.log(1)");

        let err = network
            .fetch(&FetchRequest::get("http://localhost/missing.js").unwrap())
            .await;
        assert!(matches!(err, Err(WorkerError::Network(_))));
        assert_eq!(network.call_count(), 2);
    }
}
