//! Round state and its transitions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, CELL_COUNT, Player},
    lines::WinningLine,
};

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Why a move was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    GameOver,
    OutOfRange,
    Occupied,
}

/// Result of offering a move to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was ignored and the state is unchanged
    Rejected(RejectReason),
    /// The mark was placed and the turn passed to `next`
    Continue { next: Player },
    /// The mark completed `line`
    Win { winner: Player, line: [usize; 3] },
    /// The mark filled the board without completing a line
    Draw,
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }
}

/// What the turn badge shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Turn(Player),
    Winner(Player),
    Draw,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Turn(player) => write!(f, "Turn: {player}"),
            Status::Winner(player) => write!(f, "Winner: {player}"),
            Status::Draw => write!(f, "Draw"),
        }
    }
}

/// State of the round in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub turn: Player,
    pub board: Board,
    pub over: bool,
    pub winning_line: Option<[usize; 3]>,
}

impl GameState {
    /// A fresh round with X to move
    pub fn new() -> Self {
        Self {
            turn: Player::X,
            board: Board::new(),
            over: false,
            winning_line: None,
        }
    }

    /// Offer a move at `index`.
    ///
    /// Rejected moves leave the state untouched. An accepted move places the
    /// current mark, then either ends the round (win or full board) or passes
    /// the turn.
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        if self.over {
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }
        if index >= CELL_COUNT {
            return MoveOutcome::Rejected(RejectReason::OutOfRange);
        }
        if !self.board.is_empty(index) {
            return MoveOutcome::Rejected(RejectReason::Occupied);
        }

        self.board.place(index, self.turn);

        if let Some(WinningLine { player, line }) = self.board.winning_line() {
            self.over = true;
            self.winning_line = Some(line);
            return MoveOutcome::Win {
                winner: player,
                line,
            };
        }

        if self.board.is_full() {
            self.over = true;
            return MoveOutcome::Draw;
        }

        self.turn = self.turn.opponent();
        MoveOutcome::Continue { next: self.turn }
    }

    /// Clear the board and hand the first move back to X
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Badge status for the renderer
    pub fn status(&self) -> Status {
        if !self.over {
            return Status::Turn(self.turn);
        }
        match self.board.winner() {
            Some(player) => Status::Winner(player),
            None => Status::Draw,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    fn play(moves: &[usize]) -> (GameState, Vec<MoveOutcome>) {
        let mut state = GameState::new();
        let outcomes = moves.iter().map(|&m| state.apply_move(m)).collect();
        (state, outcomes)
    }

    #[test]
    fn test_turn_alternates() {
        let (state, outcomes) = play(&[0, 1, 2, 4]);
        assert_eq!(
            outcomes,
            vec![
                MoveOutcome::Continue { next: Player::O },
                MoveOutcome::Continue { next: Player::X },
                MoveOutcome::Continue { next: Player::O },
                MoveOutcome::Continue { next: Player::X },
            ]
        );
        assert_eq!(state.turn, Player::X);
    }

    #[test]
    fn test_top_row_win() {
        let (state, outcomes) = play(&[0, 4, 1, 3, 2]);
        assert_eq!(
            outcomes.last(),
            Some(&MoveOutcome::Win {
                winner: Player::X,
                line: [0, 1, 2]
            })
        );
        assert_eq!(state.board.encode(), "XXXOO....");
        assert!(state.over);
        assert_eq!(state.winning_line, Some([0, 1, 2]));
        assert_eq!(state.status(), Status::Winner(Player::X));
    }

    #[test]
    fn test_draw() {
        let (state, outcomes) = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(outcomes.last(), Some(&MoveOutcome::Draw));
        assert!(state.over);
        assert_eq!(state.winning_line, None);
        assert_eq!(state.status(), Status::Draw);
    }

    #[test]
    fn test_occupied_cell_is_noop() {
        let (mut state, _) = play(&[4]);
        let before = state;
        assert_eq!(
            state.apply_move(4),
            MoveOutcome::Rejected(RejectReason::Occupied)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut state = GameState::new();
        let before = state;
        assert_eq!(
            state.apply_move(9),
            MoveOutcome::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_moves_after_game_over_are_rejected() {
        let (mut state, _) = play(&[0, 4, 1, 3, 2]);
        let before = state;
        assert_eq!(
            state.apply_move(8),
            MoveOutcome::Rejected(RejectReason::GameOver)
        );
        assert_eq!(state, before);
        assert!(state.board.is_empty(8));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        // X O X
        // O X O
        // O X X  <- X completes the main diagonal on the ninth move
        let (state, outcomes) = play(&[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert_eq!(
            outcomes.last(),
            Some(&MoveOutcome::Win {
                winner: Player::X,
                line: [0, 4, 8]
            })
        );
        assert!(state.board.is_full());
    }

    #[test]
    fn test_reset() {
        let (mut state, _) = play(&[0, 4, 1, 3, 2]);
        state.reset();
        assert_eq!(state, GameState::new());
        assert_eq!(state.turn, Player::X);
        assert!(state.board.cells.iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Turn(Player::O).to_string(), "Turn: O");
        assert_eq!(Status::Winner(Player::X).to_string(), "Winner: X");
        assert_eq!(Status::Draw.to_string(), "Draw");
    }
}
