//! Options shared by every command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::{App, AppConfig};

/// Global options
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the score store and cached assets
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory served as the origin for the asset cache worker
    #[arg(long, global = true)]
    pub site_root: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the configuration file if given, then apply command-line overrides.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AppConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(root) = &self.site_root {
            config = config.with_site_root(root);
        }
        Ok(config)
    }

    /// Build the production app from the effective configuration.
    pub fn app(&self) -> Result<App> {
        Ok(App::new(self.app_config()?))
    }
}
