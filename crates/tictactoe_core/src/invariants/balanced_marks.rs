//! Balanced marks invariant: mark counts never drift more than one apart.

use super::super::{Board, GameInProgress, Player, Square};
use super::Invariant;

/// Invariant: |X marks - O marks| <= 1.
///
/// Alternating play adds one mark per turn, so the counts can never be
/// more than one apart.
pub struct BalancedMarksInvariant;

impl Invariant<Board> for BalancedMarksInvariant {
    fn holds(board: &Board) -> bool {
        let x_count = board.count_marks(Square::Occupied(Player::X));
        let o_count = board.count_marks(Square::Occupied(Player::O));
        x_count.abs_diff(o_count) <= 1
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one"
    }
}

impl Invariant<GameInProgress> for BalancedMarksInvariant {
    fn holds(game: &GameInProgress) -> bool {
        <Self as Invariant<Board>>::holds(game.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
