//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod buckets;
pub mod directory_origin;
pub mod file_store;
pub mod in_memory_cache;
pub mod in_memory_store;
pub mod msgpack_cache;

pub use buckets::CacheBuckets;
pub use directory_origin::DirectoryOrigin;
pub use file_store::FileKeyValueStore;
pub use in_memory_cache::InMemoryCacheStorage;
pub use in_memory_store::InMemoryKeyValueStore;
pub use msgpack_cache::MsgPackCacheStorage;
