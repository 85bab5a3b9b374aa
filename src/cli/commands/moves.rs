//! Move command - play a sequence of cells on a fresh round

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{config::GlobalArgs, output},
    tictactoe::{Engine, MoveOutcome, Score, Status},
};

#[derive(Parser, Debug)]
#[command(about = "Play a sequence of cells (1-9) on a fresh round")]
pub struct MoveArgs {
    /// Cells in play order, 1 is top-left and 9 is bottom-right
    #[arg(required = true, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub cells: Vec<u8>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MoveReport {
    board: String,
    status: Status,
    winning_line: Option<[usize; 3]>,
    outcomes: Vec<MoveOutcome>,
    score: Score,
}

pub fn execute(global: &GlobalArgs, args: MoveArgs) -> Result<()> {
    let app = global.app()?;
    let mut engine = app.create_engine();
    let report = play_sequence(&mut engine, &args.cells);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", output::render_board(engine.state()));
    output::print_section("Result");
    output::print_kv("Status", &report.status.to_string());
    let ignored = report.outcomes.iter().filter(|o| !o.is_accepted()).count();
    if ignored > 0 {
        output::print_kv("Ignored moves", &ignored.to_string());
    }
    output::print_kv("Score", &output::render_score(&report.score));
    Ok(())
}

fn play_sequence(engine: &mut Engine, cells: &[u8]) -> MoveReport {
    let outcomes = cells
        .iter()
        .map(|&cell| engine.apply_move(usize::from(cell) - 1))
        .collect();
    let state = engine.state();
    MoveReport {
        board: state.board.encode(),
        status: state.status(),
        winning_line: state.winning_line,
        outcomes,
        score: engine.score(),
    }
}
