//! Cache command - install the offline assets and fetch through the worker

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::{
    adapters::DirectoryOrigin,
    app::{App, AppBuilder},
    cli::{config::GlobalArgs, output},
    worker::{AssetCacheWorker, LifecycleState, Request},
};

#[derive(Parser, Debug)]
#[command(about = "Manage the offline asset cache")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Install the manifest into the current bucket and activate it
    Install {
        /// Stop after install, leaving stale buckets in place
        #[arg(long)]
        no_activate: bool,
    },

    /// Request a path through the activated worker
    Fetch {
        /// Path relative to the site, e.g. ./app.js
        url: String,

        /// Request method
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Simulate a network outage
        #[arg(long)]
        offline: bool,

        /// Write the body to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List cache buckets
    List,
}

pub fn execute(global: &GlobalArgs, args: CacheArgs) -> Result<()> {
    let config = global.app_config()?;
    let origin = Arc::new(DirectoryOrigin::new(config.site_root.clone()));
    let app = AppBuilder::new()
        .with_config(config)
        .with_shared_network(origin.clone())
        .build();

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(async {
        match args.command {
            CacheCommand::Install { no_activate } => install(&app, no_activate).await,
            CacheCommand::Fetch {
                url,
                method,
                offline,
                output,
            } => {
                origin.set_online(!offline);
                fetch(&app, &Request::new(&method, &url), output).await
            }
            CacheCommand::List => list(&app).await,
        }
    })
}

async fn install(app: &App, no_activate: bool) -> Result<()> {
    let mut worker = app.create_worker();
    let spinner = output::create_spinner(&format!(
        "Installing {} assets into {}",
        worker.config().manifest.len(),
        worker.config().cache_name
    ));

    let result = worker.install().await;
    spinner.finish_and_clear();
    result.context("install failed")?;

    if !no_activate {
        worker.activate().await.context("activate failed")?;
    }

    output::print_section("Worker");
    output::print_kv("Cache", &worker.config().cache_name);
    output::print_kv("State", &worker.state().to_string());
    output::print_kv("Assets", &worker.config().manifest.len().to_string());
    Ok(())
}

/// Resume the installed worker and make sure it is activated.
///
/// A worker left waiting by `cache install --no-activate` has no earlier
/// process holding on to the old deployment, so it activates here and drops
/// the stale buckets before anything is served.
pub async fn serving_worker(app: &App) -> Result<AssetCacheWorker> {
    let mut worker = app.resume_worker().await?;
    match worker.state() {
        LifecycleState::Activated => {}
        LifecycleState::Installed => worker.activate().await.context("activate failed")?,
        _ => bail!(
            "no installed cache '{}'; run `noughts cache install` first",
            worker.config().cache_name
        ),
    }
    Ok(worker)
}

async fn fetch(app: &App, request: &Request, destination: Option<PathBuf>) -> Result<()> {
    let worker = serving_worker(app).await?;

    let Some(response) = worker.handle_fetch(request).await? else {
        bail!("{request} failed: network unreachable and no cached fallback");
    };

    eprintln!("{} {}", response.status, request);
    match destination {
        Some(path) => fs::write(&path, &response.body)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", String::from_utf8_lossy(&response.body)),
    }
    Ok(())
}

async fn list(app: &App) -> Result<()> {
    let current = &app.config().worker.cache_name;
    let names = app.cache().keys().await?;

    output::print_section("Caches");
    if names.is_empty() {
        println!("  (none)");
    }
    for name in names {
        let marker = if &name == current { " (current)" } else { "" };
        println!("  {name}{marker}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{InMemoryCacheStorage, InMemoryKeyValueStore},
        app::AppConfig,
        ports::{CacheStorage, Fetcher},
        worker::{Response, WorkerConfig},
    };

    struct Versioned(&'static str);

    #[async_trait::async_trait]
    impl Fetcher for Versioned {
        async fn fetch(&self, request: &Request) -> crate::Result<Response> {
            Ok(Response::ok(format!("{} {}", self.0, request.url())))
        }
    }

    fn app_for(cache: &InMemoryCacheStorage, worker: WorkerConfig, origin: &'static str) -> App {
        AppBuilder::new()
            .with_config(AppConfig::default().with_worker(worker))
            .with_store(InMemoryKeyValueStore::new())
            .with_cache(cache.clone())
            .with_network(Versioned(origin))
            .build()
    }

    #[tokio::test]
    async fn test_install_without_activate_then_fetch_serves_new_version() {
        let cache = InMemoryCacheStorage::new();
        let v3 = app_for(&cache, WorkerConfig::default(), "v3");
        install(&v3, false).await.unwrap();

        let v4_config = WorkerConfig::default().with_cache_name("ttt-pwa-v4");
        let v4 = app_for(&cache, v4_config, "v4");
        install(&v4, true).await.unwrap();
        assert_eq!(cache.keys().await.unwrap().len(), 2);

        let worker = serving_worker(&v4).await.unwrap();
        assert_eq!(worker.state(), LifecycleState::Activated);
        assert_eq!(cache.keys().await.unwrap(), vec!["ttt-pwa-v4".to_string()]);

        let response = worker
            .handle_fetch(&Request::get("./app.js"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.body, b"v4 ./app.js".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_without_install_is_an_error() {
        let cache = InMemoryCacheStorage::new();
        let app = app_for(&cache, WorkerConfig::default(), "v3");

        assert!(serving_worker(&app).await.is_err());
    }
}
