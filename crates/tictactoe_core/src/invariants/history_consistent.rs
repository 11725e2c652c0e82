//! History consistency invariant: the board is the start board plus the moves.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: replaying the history onto the starting board reproduces
/// the current board.
///
/// Every move lands on a square that was empty at the time, and no square
/// is filled without a move. This makes the board monotonic: marks are
/// never overwritten.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = game.initial_board().clone();

        for mov in game.history() {
            if reconstructed.place(mov.coordinate, mov.player).is_err() {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board matches the starting board plus the move history"
    }
}
