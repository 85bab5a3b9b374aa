//! Dependency injection container for the application.
//!
//! The container owns the infrastructure adapters and builds the engine and
//! the worker on top of them.

use std::sync::Arc;

use super::config::AppConfig;
use crate::{
    Result,
    adapters::{DirectoryOrigin, FileKeyValueStore, MsgPackCacheStorage},
    ports::{CacheStorage, Fetcher, KeyValueStore},
    tictactoe::Engine,
    worker::AssetCacheWorker,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use noughts::app::{App, AppConfig};
///
/// let app = App::new(AppConfig::default());
/// let mut engine = app.create_engine();
/// engine.apply_move(4);
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use noughts::app::App;
/// use noughts::adapters::{InMemoryCacheStorage, InMemoryKeyValueStore};
///
/// let app = App::for_testing()
///     .with_store(InMemoryKeyValueStore::new())
///     .with_cache(InMemoryCacheStorage::new())
///     .build();
/// let engine = app.create_engine();
/// assert_eq!(engine.score().rounds(), 0);
/// ```
pub struct App {
    config: AppConfig,
    store: Arc<dyn KeyValueStore + Send + Sync>,
    cache: Arc<dyn CacheStorage>,
    network: Arc<dyn Fetcher>,
}

impl App {
    /// Create an app with file-backed adapters rooted at `config.data_dir`.
    ///
    /// Uses:
    /// - `FileKeyValueStore` for the score
    /// - `MsgPackCacheStorage` for cached assets
    /// - `DirectoryOrigin` on `config.site_root` as the network
    pub fn new(config: AppConfig) -> Self {
        AppBuilder::new().with_config(config).build()
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore + Send + Sync> {
        Arc::clone(&self.store)
    }

    pub fn cache(&self) -> Arc<dyn CacheStorage> {
        Arc::clone(&self.cache)
    }

    /// Create an engine with the stored score loaded.
    pub fn create_engine(&self) -> Engine {
        Engine::with_store(self.store(), &self.config.score_key)
    }

    /// Create a freshly parsed worker for the configured deployment.
    pub fn create_worker(&self) -> AssetCacheWorker {
        AssetCacheWorker::with_shared(
            self.config.worker.clone(),
            self.cache(),
            Arc::clone(&self.network),
        )
    }

    /// Bring back the worker of an earlier run, activated if its bucket exists.
    pub async fn resume_worker(&self) -> Result<AssetCacheWorker> {
        AssetCacheWorker::resume(
            self.config.worker.clone(),
            self.cache(),
            Arc::clone(&self.network),
        )
        .await
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// Any adapter not set falls back to the file-backed default for the
/// configured paths.
#[derive(Default)]
pub struct AppBuilder {
    config: AppConfig,
    store: Option<Arc<dyn KeyValueStore + Send + Sync>>,
    cache: Option<Arc<dyn CacheStorage>>,
    network: Option<Arc<dyn Fetcher>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_store<S: KeyValueStore + Send + Sync + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_cache<C: CacheStorage + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    pub fn with_network<F: Fetcher + 'static>(mut self, network: F) -> Self {
        self.network = Some(Arc::new(network));
        self
    }

    /// Use a network handle the caller keeps, e.g. to switch it offline.
    pub fn with_shared_network(mut self, network: Arc<dyn Fetcher>) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> App {
        let config = self.config;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(FileKeyValueStore::new(config.store_path())));
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MsgPackCacheStorage::new(config.cache_path())));
        let network = self
            .network
            .unwrap_or_else(|| Arc::new(DirectoryOrigin::new(config.site_root.clone())));
        App {
            config,
            store,
            cache,
            network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{InMemoryCacheStorage, InMemoryKeyValueStore},
        tictactoe::Score,
    };

    #[test]
    fn test_engines_share_the_store() {
        let app = App::for_testing()
            .with_store(InMemoryKeyValueStore::new())
            .build();

        let mut engine = app.create_engine();
        for index in [0, 4, 1, 3, 2] {
            engine.apply_move(index);
        }

        assert_eq!(app.create_engine().score(), Score::new(1, 0, 0));
    }

    #[test]
    fn test_custom_score_key() {
        let store = InMemoryKeyValueStore::new();
        let mut config = AppConfig::default();
        config.score_key = "custom".to_string();
        let app = App::for_testing()
            .with_config(config)
            .with_store(store.clone())
            .build();

        app.create_engine().reset_score().unwrap();
        assert!(store.contains("custom"));
    }

    #[tokio::test]
    async fn test_resume_without_bucket_is_parsed() {
        let app = App::for_testing()
            .with_cache(InMemoryCacheStorage::new())
            .build();

        let worker = app.resume_worker().await.unwrap();
        assert_eq!(worker.state(), crate::worker::LifecycleState::Parsed);
    }
}
