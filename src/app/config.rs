//! Configuration types for wiring the application.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error, tictactoe::SCORE_KEY, worker::WorkerConfig};

/// Where the application keeps its data and how the worker is set up.
///
/// # Examples
///
/// ```
/// use noughts::app::AppConfig;
///
/// let config = AppConfig::default()
///     .with_data_dir("/tmp/noughts")
///     .with_site_root("public");
/// assert!(config.store_path().ends_with("local-storage.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the score store and cache storage
    pub data_dir: PathBuf,
    /// File name of the key-value store inside `data_dir`
    pub store_file: String,
    /// Key the score is saved under
    pub score_key: String,
    /// Directory name of the cache storage inside `data_dir`
    pub cache_dir: String,
    /// Directory served as the origin
    pub site_root: PathBuf,
    /// Asset cache worker settings
    pub worker: WorkerConfig,
}

impl AppConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine or worker cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidConfiguration {
                message: message.to_string(),
            })
        };
        if self.score_key.is_empty() {
            return invalid("score_key must not be empty");
        }
        if self.worker.cache_name.is_empty() {
            return invalid("worker.cache_name must not be empty");
        }
        if self.worker.fallback_path.is_empty() {
            return invalid("worker.fallback_path must not be empty");
        }
        Ok(())
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_site_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.site_root = root.into();
        self
    }

    pub fn with_worker(mut self, worker: WorkerConfig) -> Self {
        self.worker = worker;
        self
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.cache_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".noughts"),
            store_file: "local-storage.json".to_string(),
            score_key: SCORE_KEY.to_string(),
            cache_dir: "caches".to_string(),
            site_root: PathBuf::from("site"),
            worker: WorkerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"worker": {"cache_name": "ttt-pwa-v4"}}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.worker.cache_name, "ttt-pwa-v4");
        assert_eq!(config.worker.fallback_path, "./index.html");
        assert_eq!(config.score_key, SCORE_KEY);
    }

    #[test]
    fn test_empty_cache_name_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"worker": {"cache_name": ""}}"#).unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("cache_name"));
    }

    #[test]
    fn test_paths_are_under_data_dir() {
        let config = AppConfig::default().with_data_dir("/var/lib/noughts");
        assert_eq!(
            config.store_path(),
            PathBuf::from("/var/lib/noughts/local-storage.json")
        );
        assert_eq!(config.cache_path(), PathBuf::from("/var/lib/noughts/caches"));
    }
}
