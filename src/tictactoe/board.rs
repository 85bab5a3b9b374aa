//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::{LineAnalyzer, WinningLine};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player (mark) in the game. X always opens a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// The nine cells of a round, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Get cell at position, `None` when out of range
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check if a position is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Place a mark without any rule checks beyond bounds.
    pub(crate) fn place(&mut self, pos: usize, player: Player) {
        self.cells[pos] = player.to_cell();
    }

    /// First completed line in scan order, if any
    pub fn winning_line(&self) -> Option<WinningLine> {
        LineAnalyzer::find_winner(&self.cells)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        self.winning_line().map(|win| win.player)
    }

    /// Compact one-line encoding, e.g. `XXXOO....`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
