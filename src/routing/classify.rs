//! Request Classification Module
//!
//! Maps a request URL to exactly one route class. Classification is total
//! and checked in priority order: static, then dynamic, then api, then
//! other.

use url::Url;

use crate::config::WorkerConfig;

// == Route Class ==
/// The caching policy category assigned to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Known application asset: cache-first, stale-while-revalidate
    Static,
    /// Allow-listed external origin: network-first, cache fallback
    Dynamic,
    /// API request: network-only, never cached
    Api,
    /// Everything else: network-only passthrough
    Other,
}

impl RouteClass {
    /// Lower-case label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            RouteClass::Static => "static",
            RouteClass::Dynamic => "dynamic",
            RouteClass::Api => "api",
            RouteClass::Other => "other",
        }
    }
}

// == Classification ==
/// Classifies a URL against the configured allow-lists.
///
/// Static wins over dynamic, dynamic over api, api over other; exactly one
/// class applies to every URL.
pub fn classify(config: &WorkerConfig, url: &Url) -> RouteClass {
    if is_static_asset(config, url) {
        RouteClass::Static
    } else if is_dynamic_origin(config, url) {
        RouteClass::Dynamic
    } else if is_api_request(config, url) {
        RouteClass::Api
    } else {
        RouteClass::Other
    }
}

/// Exact-path match against the static allow-list, or filename-suffix match
/// (final path segment equals the filename of an allow-list entry). The
/// loose filename match can collide for same-named files under different
/// routes; it is kept to match how the asset list was authored.
fn is_static_asset(config: &WorkerConfig, url: &Url) -> bool {
    let path = url.path();
    if config.static_assets.iter().any(|asset| asset == path) {
        return true;
    }

    let filename = path.rsplit('/').next().unwrap_or("");
    if filename.is_empty() {
        return false;
    }
    config
        .static_assets
        .iter()
        .any(|asset| asset.rsplit('/').next() == Some(filename))
}

/// URL prefix match against the dynamic external-origin allow-list.
fn is_dynamic_origin(config: &WorkerConfig, url: &Url) -> bool {
    config
        .dynamic_origins
        .iter()
        .any(|origin| url.as_str().starts_with(origin.as_str()))
}

/// Path-prefix or hostname-substring match for API requests.
fn is_api_request(config: &WorkerConfig, url: &Url) -> bool {
    if url.path().starts_with(&config.api_path_prefix) {
        return true;
    }
    url.host_str()
        .map_or(false, |host| host.contains(&config.api_host_marker))
}
