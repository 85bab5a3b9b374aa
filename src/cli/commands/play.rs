//! Play command - interactive game on the terminal

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{config::GlobalArgs, output},
    tictactoe::{Engine, MoveOutcome, RejectReason},
};

#[derive(Parser, Debug, Default)]
#[command(about = "Play an interactive game")]
pub struct PlayArgs {}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayInput {
    /// 0-based cell index
    Cell(usize),
    ResetRound,
    ResetScore,
    Quit,
}

impl FromStr for PlayInput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "reset" => Ok(PlayInput::ResetRound),
            "s" | "reset-score" => Ok(PlayInput::ResetScore),
            "q" | "quit" | "exit" => Ok(PlayInput::Quit),
            other => match other.parse::<usize>() {
                Ok(n @ 1..=9) => Ok(PlayInput::Cell(n - 1)),
                _ => Err(format!(
                    "'{other}' is not a cell (1-9), r (new round), s (reset score) or q (quit)"
                )),
            },
        }
    }
}

pub fn execute(global: &GlobalArgs, _args: PlayArgs) -> Result<()> {
    let app = global.app()?;
    let mut engine = app.create_engine();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut engine, stdin.lock(), stdout.lock())
}

/// Drive `engine` from `input` until it ends or the player quits.
pub fn run_session<R: BufRead, W: Write>(engine: &mut Engine, input: R, mut out: W) -> Result<()> {
    render(engine, &mut out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<PlayInput>() {
            Ok(PlayInput::Quit) => break,
            Ok(PlayInput::ResetRound) => engine.reset_round(),
            Ok(PlayInput::ResetScore) => {
                if let Err(e) = engine.reset_score() {
                    writeln!(out, "Score reset, but it could not be saved: {e}")?;
                }
            }
            Ok(PlayInput::Cell(index)) => match engine.apply_move(index) {
                MoveOutcome::Rejected(RejectReason::GameOver) => {
                    writeln!(out, "Round is over. Type r for a new round.")?;
                    continue;
                }
                MoveOutcome::Rejected(_) => {
                    writeln!(out, "Cell {} is taken.", index + 1)?;
                    continue;
                }
                MoveOutcome::Win { winner, .. } => writeln!(out, "Player {winner} won!")?,
                MoveOutcome::Draw => writeln!(out, "It's a draw!")?,
                MoveOutcome::Continue { .. } => {}
            },
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        }
        render(engine, &mut out)?;
    }
    Ok(())
}

fn render<W: Write>(engine: &Engine, out: &mut W) -> Result<()> {
    writeln!(out)?;
    write!(out, "{}", output::render_board(engine.state()))?;
    writeln!(out, "{}    {}", engine.status(), output::render_score(&engine.score()))?;
    out.flush()?;
    Ok(())
}
