//! Asset manifest and worker configuration

use serde::{Deserialize, Serialize};

/// Cache bucket name for this deployment. Bump it to invalidate every asset
/// cached by earlier deployments.
pub const CACHE_NAME: &str = "ttt-pwa-v3";

/// Assets fetched and stored on install
pub const ASSETS: [&str; 6] = [
    "./",
    "./index.html",
    "./app.js",
    "./manifest.json",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
];

/// Served when a request misses the cache and the network is unreachable
pub const FALLBACK_PATH: &str = "./index.html";

/// Configuration for an asset cache worker.
///
/// # Examples
///
/// ```
/// use noughts::worker::WorkerConfig;
///
/// let config = WorkerConfig::default().with_cache_name("ttt-pwa-v4");
/// assert_eq!(config.cache_name, "ttt-pwa-v4");
/// assert_eq!(config.manifest.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name of the only bucket that survives activation
    pub cache_name: String,
    /// Paths stored on install
    pub manifest: Vec<String>,
    /// Path served when both cache and network miss
    pub fallback_path: String,
    /// Activate right after a successful install instead of waiting
    pub skip_waiting: bool,
    /// Take control of already open pages on activation
    pub claim_clients: bool,
}

impl WorkerConfig {
    pub fn with_cache_name(mut self, name: &str) -> Self {
        self.cache_name = name.to_string();
        self
    }

    pub fn with_manifest<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest = assets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback_path(mut self, path: &str) -> Self {
        self.fallback_path = path.to_string();
        self
    }

    pub fn with_skip_waiting(mut self, skip: bool) -> Self {
        self.skip_waiting = skip;
        self
    }

    pub fn with_claim_clients(mut self, claim: bool) -> Self {
        self.claim_clients = claim;
        self
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            manifest: ASSETS.iter().map(|s| s.to_string()).collect(),
            fallback_path: FALLBACK_PATH.to_string(),
            skip_waiting: true,
            claim_clients: true,
        }
    }
}
