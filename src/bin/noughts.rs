//! Noughts CLI - tic-tac-toe with a persisted score and an offline asset cache
//!
//! This CLI provides:
//! - An interactive game on the terminal
//! - Scripted move sequences for quick checks
//! - Score inspection and reset
//! - Installing and querying the offline asset cache

use anyhow::Result;
use clap::{Parser, Subcommand};
use noughts::cli::{commands, config::GlobalArgs, init_tracing};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Two-player tic-tac-toe that works offline", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(commands::play::PlayArgs),

    /// Play a sequence of cells on a fresh round
    Move(commands::moves::MoveArgs),

    /// Show or reset the score
    Score(commands::score::ScoreArgs),

    /// Install and query the offline asset cache
    Cache(commands::cache::CacheArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Play(args) => commands::play::execute(&cli.global, args),
        Commands::Move(args) => commands::moves::execute(&cli.global, args),
        Commands::Score(args) => commands::score::execute(&cli.global, args),
        Commands::Cache(args) => commands::cache::execute(&cli.global, args),
    }
}
