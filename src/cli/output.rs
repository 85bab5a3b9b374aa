//! Text rendering and progress spinners for the CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{Cell, GameState, Score};

/// Create a spinner for worker lifecycle steps
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render the board as a 3x3 grid.
///
/// Empty cells show their 1-based number so players know what to type;
/// cells on the winning line are wrapped in brackets.
pub fn render_board(state: &GameState) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let idx = row * 3 + col;
                let mark = match state.board.cells[idx] {
                    Cell::Empty => char::from_digit(idx as u32 + 1, 10).unwrap_or('?'),
                    cell => cell.to_char(),
                };
                let on_line = state.winning_line.is_some_and(|line| line.contains(&idx));
                if on_line {
                    format!("[{mark}]")
                } else {
                    format!(" {mark} ")
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

/// One-line score summary
pub fn render_score(score: &Score) -> String {
    format!("X {}  O {}  Draws {}", score.x, score.o, score.draws)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_board_shows_numbers() {
        let rendered = render_board(&GameState::new());
        assert_eq!(
            rendered,
            " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 \n"
        );
    }

    #[test]
    fn test_render_marks_winning_line() {
        let mut state = GameState::new();
        for index in [0, 4, 1, 3, 2] {
            state.apply_move(index);
        }
        let rendered = render_board(&state);
        assert!(rendered.starts_with("[X]|[X]|[X]\n"));
        assert!(rendered.contains(" O | O | 6 "));
    }

    #[test]
    fn test_render_score() {
        assert_eq!(render_score(&Score::new(2, 1, 3)), "X 2  O 1  Draws 3");
    }
}
