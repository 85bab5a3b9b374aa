//! Network port - how the worker reaches the origin

use async_trait::async_trait;

use crate::{
    Result,
    worker::{Request, Response},
};

/// Port for fetching a resource from the network.
///
/// A response with any status, including 404, is a successful fetch. Only a
/// failure to get a response at all (offline, connection refused) is an
/// error, reported as [`crate::Error::Network`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response>;
}
