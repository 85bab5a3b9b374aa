//! MessagePack implementation of cache storage.
//!
//! This adapter implements the CacheStorage port on a single MessagePack file
//! using rmp_serde. Each operation reads the file, applies the change and
//! writes it back through a temporary sibling and a rename, so a crash never
//! leaves half a batch on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use super::buckets::CacheBuckets;
use crate::{
    Result,
    error::Error,
    ports::CacheStorage,
    worker::{Request, Response},
};

const STORAGE_FILE: &str = "cache-storage.msgpack";

/// Directory-backed cache storage.
///
/// # Examples
///
/// ```no_run
/// use noughts::adapters::MsgPackCacheStorage;
/// use noughts::ports::CacheStorage;
///
/// # #[tokio::main]
/// # async fn main() -> noughts::Result<()> {
/// let storage = MsgPackCacheStorage::new("data/caches");
/// for name in storage.keys().await? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MsgPackCacheStorage {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl MsgPackCacheStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    async fn load(&self) -> Result<CacheBuckets> {
        let path = self.file();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CacheBuckets::new()),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open file {path:?}"),
                    source,
                });
            }
        };

        rmp_serde::from_slice(&bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize cache storage from MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    async fn store(&self, buckets: &CacheBuckets) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| Error::Io {
                operation: format!("create directory {:?}", self.dir),
                source,
            })?;

        let bytes = rmp_serde::to_vec(buckets).map_err(|e| Error::SerializationContext {
            operation: "serialize cache storage to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        let path = self.file();
        let tmp = path.with_extension("msgpack.tmp");
        fs::write(&tmp, bytes).await.map_err(|source| Error::Io {
            operation: format!("write file {tmp:?}"),
            source,
        })?;
        fs::rename(&tmp, &path).await.map_err(|source| Error::Io {
            operation: format!("replace file {path:?}"),
            source,
        })
    }

    async fn update<T>(&self, change: impl FnOnce(&mut CacheBuckets) -> T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut buckets = self.load().await?;
        let result = change(&mut buckets);
        self.store(&buckets).await?;
        Ok(result)
    }

    async fn read<T>(&self, view: impl FnOnce(&CacheBuckets) -> T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let buckets = self.load().await?;
        Ok(view(&buckets))
    }
}

#[async_trait]
impl CacheStorage for MsgPackCacheStorage {
    async fn keys(&self) -> Result<Vec<String>> {
        self.read(CacheBuckets::names).await
    }

    async fn open(&self, name: &str) -> Result<()> {
        self.update(|buckets| {
            buckets.open(name);
        })
        .await
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        self.update(|buckets| buckets.delete(name)).await
    }

    async fn match_in(&self, name: &str, request: &Request) -> Result<Option<Response>> {
        self.read(|buckets| buckets.get(name, request)).await
    }

    async fn match_request(&self, request: &Request) -> Result<Option<Response>> {
        self.read(|buckets| buckets.find(request)).await
    }

    async fn put(&self, name: &str, request: &Request, response: &Response) -> Result<()> {
        self.update(|buckets| buckets.insert(name, request, response.clone()))
            .await
    }

    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        self.update(|buckets| buckets.insert_all(name, entries))
            .await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = MsgPackCacheStorage::new(temp_dir.path().join("caches"));
        let request = Request::get("./app.js");

        storage
            .put(
                "v1",
                &request,
                &Response::ok("js").with_header("Content-Type", "text/javascript"),
            )
            .await
            .unwrap();

        let reopened = MsgPackCacheStorage::new(storage.dir());
        let hit = reopened.match_request(&request).await.unwrap().unwrap();
        assert_eq!(hit.body, b"js".to_vec());
        assert_eq!(hit.header("content-type"), Some("text/javascript"));
        assert_eq!(reopened.keys().await.unwrap(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = MsgPackCacheStorage::new(temp_dir.path().join("absent"));
        assert!(storage.keys().await.unwrap().is_empty());
        assert!(!storage.delete("v1").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupted_file_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join(STORAGE_FILE), b"\xc1\xc1").unwrap();

        let storage = MsgPackCacheStorage::new(temp_dir.path());
        assert!(storage.keys().await.is_err());
    }
}
