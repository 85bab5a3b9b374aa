//! Application layer with dependency injection container.
//!
//! The container owns the infrastructure adapters and hands out the two
//! domain components built on them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │          App (DI Container)          │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                      │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - FileKeyValueStore                 │   │
//! │  │  - MsgPackCacheStorage               │   │
//! │  │  - DirectoryOrigin                   │   │
//! │  │  - InMemory* (testing)               │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - KeyValueStore                     │   │
//! │  │  - CacheStorage, Fetcher             │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                   │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain                              │   │
//! │  │  - tictactoe::Engine                 │   │
//! │  │  - worker::AssetCacheWorker          │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod container;

pub use config::AppConfig;
pub use container::{App, AppBuilder};
