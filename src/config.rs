//! Configuration Module
//!
//! Immutable worker configuration: cache version, allow-lists and routing
//! markers. Injected at startup so tests can run with alternate allow-lists.

use std::env;

/// Worker configuration parameters.
///
/// The defaults embed the application's install-time asset list and the
/// external origins eligible for opportunistic caching. Version and port can
/// be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Cache version; bumping it orphans previous stores for deletion
    pub cache_version: String,
    /// Origin the application assets are served from (used at install time)
    pub app_origin: String,
    /// Same-origin paths pre-cached at install and served cache-first
    pub static_assets: Vec<String>,
    /// External origins eligible for network-first opportunistic caching
    pub dynamic_origins: Vec<String>,
    /// Path prefix identifying API requests (never cached)
    pub api_path_prefix: String,
    /// Hostname substring identifying API requests (never cached)
    pub api_host_marker: String,
    /// HTTP gateway port
    pub server_port: u16,
}

impl WorkerConfig {
    /// Creates a new WorkerConfig by loading overrides from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_VERSION` - Version suffix for store names (default: "v1.2.0")
    /// - `APP_ORIGIN` - Origin serving the application assets (default: "http://localhost:8080")
    /// - `SERVER_PORT` - HTTP gateway port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_version: env::var("CACHE_VERSION").unwrap_or(defaults.cache_version),
            app_origin: env::var("APP_ORIGIN").unwrap_or(defaults.app_origin),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            ..defaults
        }
    }

    // == Store Names ==
    /// Name of the current static store (versioned bundle of known assets).
    pub fn static_store_name(&self) -> String {
        format!("static-{}", self.cache_version)
    }

    /// Name of the current dynamic store (opportunistically cached assets).
    pub fn dynamic_store_name(&self) -> String {
        format!("dynamic-{}", self.cache_version)
    }

    /// Returns true if `name` is one of the two current store names.
    pub fn is_current_store(&self, name: &str) -> bool {
        name == self.static_store_name() || name == self.dynamic_store_name()
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_version: "v1.2.0".to_string(),
            app_origin: "http://localhost:8080".to_string(),
            static_assets: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/game.html".to_string(),
                "/css/styles.css".to_string(),
                "/css/game.css".to_string(),
                "/js/app.js".to_string(),
                "/js/game.js".to_string(),
                "/js/typing-engine.js".to_string(),
                "/data/planets.json".to_string(),
                "/data/words.json".to_string(),
                "/manifest.json".to_string(),
                "/icons/icon-192.png".to_string(),
                "/icons/icon-512.png".to_string(),
            ],
            dynamic_origins: vec![
                "https://cdn.jsdelivr.net".to_string(),
                "https://www.gstatic.com".to_string(),
            ],
            api_path_prefix: "/api/".to_string(),
            api_host_marker: "api.".to_string(),
            server_port: 3000,
        }
    }
}
