//! The asset cache worker: install, activate, intercept fetches

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{LifecycleState, Request, Response, WorkerConfig};
use crate::{
    Result,
    error::Error,
    ports::{CacheStorage, Fetcher},
};

/// Keeps the page shell available offline.
///
/// The hosting runtime drives the lifecycle by awaiting [`install`] and then
/// [`activate`]; once activated, every page request goes through
/// [`handle_fetch`].
///
/// [`install`]: AssetCacheWorker::install
/// [`activate`]: AssetCacheWorker::activate
/// [`handle_fetch`]: AssetCacheWorker::handle_fetch
///
/// # Examples
///
/// ```
/// use noughts::adapters::InMemoryCacheStorage;
/// use noughts::ports::Fetcher;
/// use noughts::worker::{AssetCacheWorker, Request, Response, WorkerConfig};
///
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl Fetcher for Echo {
///     async fn fetch(&self, request: &Request) -> noughts::Result<Response> {
///         Ok(Response::ok(request.url()))
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> noughts::Result<()> {
/// let mut worker = AssetCacheWorker::new(
///     WorkerConfig::default(),
///     InMemoryCacheStorage::new(),
///     Echo,
/// );
/// worker.start().await?;
/// let response = worker.handle_fetch(&Request::get("./app.js")).await?;
/// assert_eq!(response.unwrap().body, b"./app.js".to_vec());
/// # Ok(())
/// # }
/// ```
pub struct AssetCacheWorker {
    config: WorkerConfig,
    cache: Arc<dyn CacheStorage>,
    network: Arc<dyn Fetcher>,
    state: LifecycleState,
    controls_clients: bool,
}

impl AssetCacheWorker {
    pub fn new<C, F>(config: WorkerConfig, cache: C, network: F) -> Self
    where
        C: CacheStorage + 'static,
        F: Fetcher + 'static,
    {
        Self::with_shared(config, Arc::new(cache), Arc::new(network))
    }

    /// Build a worker on storage and network handles shared with the host.
    pub fn with_shared(
        config: WorkerConfig,
        cache: Arc<dyn CacheStorage>,
        network: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            config,
            cache,
            network,
            state: LifecycleState::Parsed,
            controls_clients: false,
        }
    }

    /// Restart a worker whose deployment may already be installed.
    ///
    /// Only the bucket list survives a restart. When the current bucket is the
    /// only one, the earlier worker got through activation and this one comes
    /// back activated and in control. When stale buckets remain next to it,
    /// activation never ran, so the worker comes back installed and waiting.
    /// Without a current bucket it is freshly parsed and must be installed.
    pub async fn resume(
        config: WorkerConfig,
        cache: Arc<dyn CacheStorage>,
        network: Arc<dyn Fetcher>,
    ) -> Result<Self> {
        let names = cache.keys().await?;
        let installed = names.contains(&config.cache_name);
        let stale = names.iter().filter(|&name| name != &config.cache_name).count();

        let mut worker = Self::with_shared(config, cache, network);
        if installed && stale == 0 {
            worker.state = LifecycleState::Activated;
            worker.controls_clients = true;
            debug!(cache = %worker.config.cache_name, "resumed activated worker");
        } else if installed {
            worker.state = LifecycleState::Installed;
            debug!(cache = %worker.config.cache_name, stale, "resumed waiting worker");
        }
        Ok(worker)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Whether open pages are routed through this worker
    pub fn controls_clients(&self) -> bool {
        self.controls_clients
    }

    /// Install, then activate right away when `skip_waiting` is set.
    pub async fn start(&mut self) -> Result<LifecycleState> {
        self.install().await?;
        if self.config.skip_waiting {
            self.activate().await?;
        }
        Ok(self.state)
    }

    /// Fetch every manifest asset and store them in the current bucket.
    ///
    /// All or nothing: if any asset cannot be fetched or answers with a
    /// non-success status, nothing is stored, the worker becomes
    /// [`LifecycleState::Redundant`], and the error names the asset.
    pub async fn install(&mut self) -> Result<()> {
        if !self.state.can_install() {
            return Err(Error::InvalidLifecycleTransition {
                action: "install",
                state: self.state,
            });
        }
        self.state = LifecycleState::Installing;
        info!(cache = %self.config.cache_name, assets = self.config.manifest.len(), "installing");

        match self.precache().await {
            Ok(()) => {
                self.state = LifecycleState::Installed;
                info!(cache = %self.config.cache_name, "installed");
                Ok(())
            }
            Err(e) => {
                self.state = LifecycleState::Redundant;
                warn!(cache = %self.config.cache_name, error = %e, "install failed");
                Err(e)
            }
        }
    }

    async fn precache(&self) -> Result<()> {
        let mut entries = Vec::with_capacity(self.config.manifest.len());
        for asset in &self.config.manifest {
            let request = Request::get(asset);
            let response =
                self.network
                    .fetch(&request)
                    .await
                    .map_err(|e| Error::InstallFailed {
                        asset: asset.clone(),
                        message: e.to_string(),
                    })?;
            if !response.is_ok() {
                return Err(Error::InstallFailed {
                    asset: asset.clone(),
                    message: format!("status {}", response.status),
                });
            }
            entries.push((request, response));
        }

        self.cache
            .put_all(&self.config.cache_name, entries)
            .await
            .map_err(|e| Error::InstallFailed {
                asset: self.config.cache_name.clone(),
                message: e.to_string(),
            })
    }

    /// Delete every bucket except the current one and start serving fetches.
    pub async fn activate(&mut self) -> Result<()> {
        if !self.state.can_activate() {
            return Err(Error::InvalidLifecycleTransition {
                action: "activate",
                state: self.state,
            });
        }
        self.state = LifecycleState::Activating;

        let stale: Vec<String> = self
            .cache
            .keys()
            .await?
            .into_iter()
            .filter(|name| name != &self.config.cache_name)
            .collect();
        for name in &stale {
            if self.cache.delete(name).await? {
                info!(cache = %name, "deleted stale cache");
            }
        }

        self.state = LifecycleState::Activated;
        self.controls_clients = self.config.claim_clients;
        info!(
            cache = %self.config.cache_name,
            removed = stale.len(),
            claimed = self.controls_clients,
            "activated"
        );
        Ok(())
    }

    /// Answer a page request: cache first, then network, then the fallback.
    ///
    /// Cache hits are returned as stored, without revalidation. A network
    /// response is copied into the current bucket before it is returned; only
    /// `GET` requests are stored. When the network is unreachable the cached
    /// fallback page is returned whatever was asked for. `Ok(None)` means
    /// neither network nor fallback could answer.
    pub async fn handle_fetch(&self, request: &Request) -> Result<Option<Response>> {
        if !self.state.serves_fetches() {
            return Err(Error::InvalidLifecycleTransition {
                action: "intercept fetch",
                state: self.state,
            });
        }

        if let Some(cached) = self.cache.match_request(request).await? {
            debug!(%request, "cache hit");
            return Ok(Some(cached));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                self.write_through(request, &response).await;
                Ok(Some(response))
            }
            Err(e) => {
                let fallback = Request::get(&self.config.fallback_path);
                warn!(%request, error = %e, fallback = fallback.url(), "network failed, serving fallback");
                self.cache.match_request(&fallback).await
            }
        }
    }

    async fn write_through(&self, request: &Request, response: &Response) {
        if !request.is_get() || !response.is_cacheable() {
            debug!(%request, status = response.status, "not cacheable");
            return;
        }
        match self
            .cache
            .put(&self.config.cache_name, request, response)
            .await
        {
            Ok(()) => debug!(%request, status = response.status, "cached from network"),
            Err(e) => warn!(%request, error = %e, "failed to cache response"),
        }
    }
}
