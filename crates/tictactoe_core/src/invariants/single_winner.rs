//! Single winner invariant: at most one player holds three in a row.

use super::super::rules::has_run;
use super::super::{Board, GameInProgress, Player};
use super::Invariant;

/// Invariant: X and O never both hold a run.
///
/// The game stops at the first run, so the opponent never gets to
/// complete one of their own.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        !(has_run(board, Player::X) && has_run(board, Player::O))
    }

    fn description() -> &'static str {
        "At most one player has three in a row"
    }
}

impl Invariant<GameInProgress> for SingleWinnerInvariant {
    fn holds(game: &GameInProgress) -> bool {
        <Self as Invariant<Board>>::holds(game.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
