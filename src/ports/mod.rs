//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the domain layer and infrastructure.
//! Following hexagonal architecture, these traits are owned by the domain and
//! implemented by adapters in the infrastructure layer.

pub mod cache;
pub mod network;
pub mod store;

pub use cache::CacheStorage;
pub use network::Fetcher;
pub use store::KeyValueStore;
