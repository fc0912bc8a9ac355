//! Cosmic Cache - An offline-first request router and cache gateway
//!
//! Starts the worker (install, activate) and serves the gateway endpoints.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod net;
mod routing;
mod tasks;
mod worker;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::WorkerConfig;
use net::{HttpFetcher, OnlineFlag};
use worker::Worker;

/// Main entry point for the cache gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the worker over a real HTTP fetcher
/// 4. Install (pre-cache the static asset batch) and activate
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmic_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cosmic Cache Gateway");

    let config = WorkerConfig::from_env();
    info!(
        "Configuration loaded: version={}, origin={}, port={}, static_assets={}",
        config.cache_version,
        config.app_origin,
        config.server_port,
        config.static_assets.len()
    );
    let port = config.server_port;

    let worker = Worker::new(config, HttpFetcher::new(), OnlineFlag::online());

    // Install failure is not fatal: the gateway still serves, static misses
    // simply go to the network, and the caller can retry via a restart.
    match worker.install().await {
        Ok(assets) => {
            info!("Install complete, {} assets pre-cached", assets);
            worker.activate().await;
        }
        Err(e) => {
            error!("Install failed, serving without pre-cache: {}", e);
        }
    }

    let app = create_router(AppState::new(worker));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Gateway shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
