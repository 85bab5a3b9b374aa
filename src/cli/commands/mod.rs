//! Subcommands of the `noughts` binary

pub mod cache;
pub mod moves;
pub mod play;
pub mod score;
