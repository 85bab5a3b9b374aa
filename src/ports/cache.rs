//! Cache storage port - named buckets of request/response pairs

use async_trait::async_trait;

use crate::{
    Result,
    worker::{Request, Response},
};

/// Port for the cache storage the asset worker serves from.
///
/// Storage holds any number of named buckets. Each bucket maps a request
/// identity (method and URL) to one response; the last write for a key wins.
/// Implementations serialize operations internally, so concurrent requests
/// for different keys never conflict.
///
/// # Examples
///
/// ```
/// use noughts::adapters::InMemoryCacheStorage;
/// use noughts::ports::CacheStorage;
/// use noughts::worker::{Request, Response};
///
/// # #[tokio::main]
/// # async fn main() -> noughts::Result<()> {
/// let storage = InMemoryCacheStorage::new();
/// let request = Request::get("./app.js");
/// storage.put("v1", &request, &Response::ok("js")).await?;
/// assert!(storage.match_request(&request).await?.is_some());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Names of all buckets, in creation order.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Create the bucket `name` if it does not exist yet.
    async fn open(&self, name: &str) -> Result<()>;

    /// Delete the bucket `name` with all its entries.
    ///
    /// Returns whether a bucket was removed.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Look `request` up in the bucket `name`.
    async fn match_in(&self, name: &str, request: &Request) -> Result<Option<Response>>;

    /// Look `request` up in every bucket, oldest bucket first.
    async fn match_request(&self, request: &Request) -> Result<Option<Response>>;

    /// Store one entry in the bucket `name`, creating the bucket if needed.
    async fn put(&self, name: &str, request: &Request, response: &Response) -> Result<()>;

    /// Store a batch of entries in the bucket `name` as one write.
    ///
    /// Either every entry is stored or, on error, none is.
    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()>;
}
