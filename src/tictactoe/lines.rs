//! Winning line analysis for Tic-Tac-Toe

use serde::{Deserialize, Serialize};

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in scan order.
///
/// When one move completes two lines, the first line in this list is the one
/// reported.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// A completed line and the player who owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    pub player: Player,
    pub line: [usize; 3],
}

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the first line in scan order holding three identical marks
    pub fn find_winner(cells: &[Cell; 9]) -> Option<WinningLine> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            let player = cells[a].player()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some(WinningLine { player, line })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_winner_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        let win = LineAnalyzer::find_winner(&cells).unwrap();
        assert_eq!(win, WinningLine { player: Player::X, line: [0, 1, 2] });
    }

    #[test]
    fn test_find_winner_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        let win = LineAnalyzer::find_winner(&cells).unwrap();
        assert_eq!(win, WinningLine { player: Player::O, line: [0, 3, 6] });
    }

    #[test]
    fn test_find_winner_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::X;
        cells[4] = Cell::X;
        cells[6] = Cell::X;

        let win = LineAnalyzer::find_winner(&cells).unwrap();
        assert_eq!(win.player, Player::X);
        assert_eq!(win.line, [2, 4, 6]);
    }

    #[test]
    fn test_find_winner_prefers_scan_order() {
        // XXX
        // X..
        // X..
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 1, 2, 3, 6] {
            cells[idx] = Cell::X;
        }

        let win = LineAnalyzer::find_winner(&cells).unwrap();
        assert_eq!(win.line, [0, 1, 2]);
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let cells = [Cell::Empty; 9];
        assert_eq!(LineAnalyzer::find_winner(&cells), None);
    }

    #[test]
    fn test_find_winner_on_every_line() {
        for line in WINNING_LINES {
            for player in [Player::X, Player::O] {
                let mut cells = [Cell::Empty; 9];
                for idx in line {
                    cells[idx] = player.to_cell();
                }
                let win = LineAnalyzer::find_winner(&cells).unwrap();
                assert_eq!(win, WinningLine { player, line });
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::O;
        cells[2] = Cell::X;
        assert_eq!(LineAnalyzer::find_winner(&cells), None);
    }
}
