//! Integration Tests for the Gateway
//!
//! Exercises the full request/response cycle: install and activation,
//! routed fetches under online and offline conditions, and the control
//! endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use cosmic_cache::cache::CachedResponse;
use cosmic_cache::net::{FetchRequest, NetworkFetcher, OnlineFlag};
use cosmic_cache::{AppState, Worker, WorkerConfig};
use cosmic_cache::api::create_router;
use cosmic_cache::error::{Result as WorkerResult, WorkerError};

// == Test Network ==

/// Canned-response fetcher for driving the gateway without a real upstream.
#[derive(Debug, Clone, Default)]
struct TestNetwork {
    responses: Arc<Mutex<HashMap<String, CachedResponse>>>,
}

impl TestNetwork {
    fn new() -> Self {
        Self::default()
    }

    fn serve(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), CachedResponse::ok(body));
    }

    fn drop_url(&self, url: &str) {
        self.responses.lock().unwrap().remove(url);
    }
}

impl NetworkFetcher for TestNetwork {
    async fn fetch(&self, request: &FetchRequest) -> WorkerResult<CachedResponse> {
        self.responses
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned()
            .ok_or_else(|| WorkerError::Network(format!("unreachable: {}", request.url)))
    }
}

// == Helper Functions ==

struct TestGateway {
    app: Router,
    worker: Worker<TestNetwork, OnlineFlag>,
    network: TestNetwork,
    online: OnlineFlag,
}

fn create_test_gateway() -> TestGateway {
    let network = TestNetwork::new();
    let online = OnlineFlag::online();
    let worker = Worker::new(WorkerConfig::default(), network.clone(), online.clone());
    let app = create_router(AppState::new(worker.clone()));
    TestGateway {
        app,
        worker,
        network,
        online,
    }
}

fn serve_all_assets(gateway: &TestGateway) {
    let config = gateway.worker.config();
    let origin = config.app_origin.trim_end_matches('/');
    for path in &config.static_assets {
        gateway
            .network
            .serve(&format!("{}{}", origin, path), &format!("asset {}", path));
    }
}

async fn install_and_activate(gateway: &TestGateway) {
    serve_all_assets(gateway);
    gateway.worker.install().await.unwrap();
    gateway.worker.activate().await;
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn post_control(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/control")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn to_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

// == Health and Stats ==

#[tokio::test]
async fn test_health_reports_worker_state() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    let (status, body) = get(&gateway.app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json = to_json(&body);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["worker_state"], "activated");
}

#[tokio::test]
async fn test_stats_reflect_lookups() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    // One cached fetch: a hit
    let (status, _) = get(
        &gateway.app,
        "/fetch?url=http://localhost:8080/index.html",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&gateway.app, "/stats").await;
    let json = to_json(&body);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 13);
}

// == Routed Fetches ==

#[tokio::test]
async fn test_precached_asset_served_when_upstream_is_gone() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    // Upstream disappears; the pre-cached copy still serves
    gateway.network.drop_url("http://localhost:8080/index.html");

    let (status, body) = get(
        &gateway.app,
        "/fetch?url=http://localhost:8080/index.html",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"asset /index.html");
}

#[tokio::test]
async fn test_dynamic_offline_without_cache_is_offline_503() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;
    gateway.online.set_online(false);

    let (status, body) = get(
        &gateway.app,
        "/fetch?url=https://cdn.jsdelivr.net/npm/chart.js",
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"Offline");
}

#[tokio::test]
async fn test_dynamic_cached_then_served_offline() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    let url = "https://cdn.jsdelivr.net/npm/chart.js";
    gateway.network.serve(url, "chart.js source");

    // First fetch populates the dynamic store
    let (status, body) = get(&gateway.app, &format!("/fetch?url={}", url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"chart.js source");

    // Offline, the cached copy serves
    gateway.online.set_online(false);
    let (status, body) = get(&gateway.app, &format!("/fetch?url={}", url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"chart.js source");
}

#[tokio::test]
async fn test_api_offline_is_api_unavailable() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;
    gateway.online.set_online(false);

    let (status, body) = get(
        &gateway.app,
        "/fetch?url=http://localhost:8080/api/scores",
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"API unavailable");
}

#[tokio::test]
async fn test_fetch_with_invalid_url_is_400() {
    let gateway = create_test_gateway();

    let (status, _) = get(&gateway.app, "/fetch?url=not-a-valid-url").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Control Endpoint ==

#[tokio::test]
async fn test_get_cache_info_after_install() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    let (status, body) = post_control(&gateway.app, r#"{"type":"GET_CACHE_INFO"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let json = to_json(&body);
    assert_eq!(json["staticCacheSize"], 13);
    assert_eq!(json["dynamicCacheSize"], 0);
    assert_eq!(json["totalSize"], 13);
}

#[tokio::test]
async fn test_clear_cache_then_cache_info_reports_zero() {
    let gateway = create_test_gateway();
    install_and_activate(&gateway).await;

    let (status, body) = post_control(&gateway.app, r#"{"type":"CLEAR_CACHE"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(to_json(&body)["success"], true);

    let (_, body) = post_control(&gateway.app, r#"{"type":"GET_CACHE_INFO"}"#).await;
    let json = to_json(&body);
    assert_eq!(json["staticCacheSize"], 0);
    assert_eq!(json["dynamicCacheSize"], 0);
    assert_eq!(json["totalSize"], 0);
}

#[tokio::test]
async fn test_skip_waiting_activates_installed_worker() {
    let gateway = create_test_gateway();
    serve_all_assets(&gateway);
    gateway.worker.install().await.unwrap();

    let (status, _) = post_control(&gateway.app, r#"{"type":"SKIP_WAITING"}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&gateway.app, "/health").await;
    assert_eq!(to_json(&body)["worker_state"], "activated");
}

#[tokio::test]
async fn test_unknown_control_message_is_ignored() {
    let gateway = create_test_gateway();

    let (status, body) =
        post_control(&gateway.app, r#"{"type":"SELF_DESTRUCT","data":{"now":true}}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}
