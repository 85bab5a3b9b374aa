//! Noughts: two-player tic-tac-toe that keeps working offline
//!
//! This crate provides:
//! - The game engine with win/draw detection and a persisted score
//! - An asset cache worker with install, activate and cache-first fetch
//! - Ports for key-value storage, cache storage and the network
//! - In-memory and file-backed adapters behind those ports

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod tictactoe;
pub mod worker;

pub use error::{Error, Result};
