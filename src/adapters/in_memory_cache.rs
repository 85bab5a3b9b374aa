//! In-memory cache storage for testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::buckets::CacheBuckets;
use crate::{
    Result,
    ports::CacheStorage,
    worker::{Request, Response},
};

/// In-memory cache storage.
///
/// Clones share the same buckets, so a test can keep a handle to inspect what
/// a worker stored, or hand the same storage to the next deployment's worker.
#[derive(Clone, Default)]
pub struct InMemoryCacheStorage {
    buckets: Arc<RwLock<CacheBuckets>>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a bucket, `None` if it does not exist.
    pub async fn entry_count(&self, name: &str) -> Option<usize> {
        self.buckets.read().await.len_of(name)
    }
}

#[async_trait]
impl CacheStorage for InMemoryCacheStorage {
    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.buckets.read().await.names())
    }

    async fn open(&self, name: &str) -> Result<()> {
        self.buckets.write().await.open(name);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.buckets.write().await.delete(name))
    }

    async fn match_in(&self, name: &str, request: &Request) -> Result<Option<Response>> {
        Ok(self.buckets.read().await.get(name, request))
    }

    async fn match_request(&self, request: &Request) -> Result<Option<Response>> {
        Ok(self.buckets.read().await.find(request))
    }

    async fn put(&self, name: &str, request: &Request, response: &Response) -> Result<()> {
        self.buckets
            .write()
            .await
            .insert(name, request, response.clone());
        Ok(())
    }

    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        self.buckets.write().await.insert_all(name, entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_match() {
        let storage = InMemoryCacheStorage::new();
        let request = Request::get("./index.html");

        assert_eq!(storage.match_request(&request).await.unwrap(), None);
        storage
            .put("v1", &request, &Response::ok("<html>"))
            .await
            .unwrap();

        let hit = storage.match_in("v1", &request).await.unwrap().unwrap();
        assert_eq!(hit.body, b"<html>".to_vec());
        assert_eq!(storage.keys().await.unwrap(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn test_clone_shares_buckets() {
        let storage = InMemoryCacheStorage::new();
        let view = storage.clone();

        storage
            .put_all(
                "v1",
                vec![
                    (Request::get("./"), Response::ok("a")),
                    (Request::get("./app.js"), Response::ok("b")),
                ],
            )
            .await
            .unwrap();

        assert_eq!(view.entry_count("v1").await, Some(2));
        assert!(view.delete("v1").await.unwrap());
        assert_eq!(storage.entry_count("v1").await, None);
    }
}
