//! Win detection logic for tic-tac-toe.
//!
//! A run is searched for from every square holding the player's mark,
//! stepping forward in each [`Direction`]. A scan that steps off the board
//! is abandoned, so partial runs at an edge never count.

use crate::coordinate::Coordinate;
use crate::types::{Board, Player, Square};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{instrument, trace};

/// Number of consecutive marks that win.
pub const RUN_LENGTH: usize = 3;

/// Forward scan directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Direction {
    /// Left to right along a row.
    Row,
    /// Top to bottom along a column.
    Column,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Direction {
    /// Row and column step for one square in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Row => (0, 1),
            Direction::Column => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Returns true if `RUN_LENGTH` squares starting at `start` and stepping in
/// `direction` all hold `player`'s mark and all lie on the board.
fn run_from(board: &Board, start: Coordinate, direction: Direction, player: Player) -> bool {
    let (d_row, d_col) = direction.delta();
    let mark = Some(Square::Occupied(player));

    (0..RUN_LENGTH as isize).all(|step| {
        start
            .offset(d_row * step, d_col * step)
            .is_some_and(|c| board.get(c) == mark)
    })
}

/// Returns true if `player` has three in a row anywhere on the board.
#[instrument(skip(board))]
pub fn has_run(board: &Board, player: Player) -> bool {
    let mark = Some(Square::Occupied(player));

    Coordinate::ALL
        .into_iter()
        .filter(|start| board.get(*start) == mark)
        .any(|start| {
            Direction::iter().any(|direction| {
                let found = run_from(board, start, direction, player);
                if found {
                    trace!(%start, ?direction, "Run found");
                }
                found
            })
        })
}

/// Checks if there is a winner on the board.
///
/// X is checked before O. Boards where both hold a run are caught by the
/// impossible-state check before this is consulted.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    Player::iter().find(|player| has_run(board, *player))
}
