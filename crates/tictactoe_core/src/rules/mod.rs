//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the same checks back both evaluation and invariants.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, has_run, Direction};

use crate::invariants::{BalancedMarksInvariant, Invariant, SingleWinnerInvariant};
use crate::outcome::{Evaluation, InvalidReason};
use crate::types::{Board, Player, Square};
use tracing::{debug, instrument};

/// Reports why a board is unreachable, if it is.
///
/// Only two cases are detected: mark counts more than one apart, and both
/// players holding a run. Other unreachable boards (say, two X lines with
/// balanced counts) pass.
#[instrument(skip(board))]
pub fn impossible_reason(board: &Board) -> Option<InvalidReason> {
    if !BalancedMarksInvariant::holds(board) {
        return Some(InvalidReason::ImpossibleState {
            x_count: board.count_marks(Square::Occupied(Player::X)),
            o_count: board.count_marks(Square::Occupied(Player::O)),
        });
    }
    if !SingleWinnerInvariant::holds(board) {
        return Some(InvalidReason::DoubleWin);
    }
    None
}

/// Classifies a board.
///
/// Checked in order, first match wins: impossible state, X wins, O wins,
/// in progress (an empty square remains), draw.
#[instrument(skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Evaluation {
    let evaluation = if let Some(reason) = impossible_reason(board) {
        Evaluation::Invalid { reason }
    } else if let Some(winner) = check_winner(board) {
        Evaluation::Win { winner }
    } else if !is_full(board) {
        Evaluation::InProgress
    } else {
        Evaluation::Draw
    };

    debug!(%evaluation, "Board evaluated");
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::parse_move;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Evaluation::InProgress);
    }

    #[test]
    fn test_center_move_in_progress() {
        let mut b = Board::new();
        b.place(parse_move("2 2").unwrap(), Player::X).unwrap();
        assert_eq!(evaluate(&b), Evaluation::InProgress);
    }

    #[test]
    fn test_x_wins_row() {
        assert_eq!(
            evaluate(&board("XXX/O../.O.")),
            Evaluation::Win { winner: Player::X }
        );
    }

    #[test]
    fn test_o_wins_diagonal() {
        assert_eq!(
            evaluate(&board("OXX/XO./..O")),
            Evaluation::Win { winner: Player::O }
        );
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        assert_eq!(
            evaluate(&board("XOX/OXO/OXX")),
            Evaluation::Win { winner: Player::X }
        );
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        assert_eq!(evaluate(&board("XOX/XOO/OXX")), Evaluation::Draw);
    }

    #[test]
    fn test_unbalanced_counts_are_invalid() {
        assert_eq!(
            evaluate(&board("XX./X../...")),
            Evaluation::Invalid {
                reason: InvalidReason::ImpossibleState { x_count: 3, o_count: 0 }
            }
        );
    }

    #[test]
    fn test_unbalanced_beats_win() {
        // X has a run, but five marks to one is unreachable.
        let evaluation = evaluate(&board("XXX/XX./O.."));
        assert!(matches!(
            evaluation,
            Evaluation::Invalid {
                reason: InvalidReason::ImpossibleState { .. }
            }
        ));
    }

    #[test]
    fn test_double_win_is_invalid() {
        assert_eq!(
            evaluate(&board("XXX/OOO/...")),
            Evaluation::Invalid { reason: InvalidReason::DoubleWin }
        );
    }

    #[test]
    fn test_two_lines_with_balanced_counts_pass() {
        // Unreachable in real play, but counts balance and O has no run.
        assert_eq!(
            evaluate(&board("XXX/XOO/XOO")),
            Evaluation::Win { winner: Player::X }
        );
    }
}
