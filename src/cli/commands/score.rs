//! Score command - show or reset the persisted score

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::cli::{config::GlobalArgs, output};

#[derive(Parser, Debug)]
#[command(about = "Show or reset the score")]
pub struct ScoreArgs {
    #[command(subcommand)]
    pub command: Option<ScoreCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ScoreCommand {
    /// Show the stored score
    Show,
    /// Zero the stored score
    Reset,
}

pub fn execute(global: &GlobalArgs, args: ScoreArgs) -> Result<()> {
    let app = global.app()?;
    let mut engine = app.create_engine();

    if let Some(ScoreCommand::Reset) = args.command {
        engine.reset_score().context("saving the reset score")?;
        println!("Score reset.");
    }

    let score = engine.score();
    output::print_section("Score");
    output::print_kv("X wins", &score.x.to_string());
    output::print_kv("O wins", &score.o.to_string());
    output::print_kv("Draws", &score.draws.to_string());
    output::print_kv("Rounds", &score.rounds().to_string());
    Ok(())
}
