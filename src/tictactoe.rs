//! Tic-Tac-Toe game engine

pub mod board;
pub mod engine;
pub mod game;
pub mod lines;
pub mod score;

pub use board::{Board, CELL_COUNT, Cell, Player};
pub use engine::{Engine, SCORE_KEY};
pub use game::{GameOutcome, GameState, MoveOutcome, RejectReason, Status};
pub use lines::{LineAnalyzer, WINNING_LINES, WinningLine};
pub use score::Score;
