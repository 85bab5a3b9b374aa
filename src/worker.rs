//! Asset cache worker
//!
//! Keeps a fixed manifest of page assets available without network
//! connectivity. Cached entries live in one bucket named after the deployed
//! version; activating a new version deletes every other bucket.

pub mod cache_worker;
pub mod lifecycle;
pub mod manifest;
pub mod request;

pub use cache_worker::AssetCacheWorker;
pub use lifecycle::LifecycleState;
pub use manifest::{ASSETS, CACHE_NAME, FALLBACK_PATH, WorkerConfig};
pub use request::{Request, Response};
