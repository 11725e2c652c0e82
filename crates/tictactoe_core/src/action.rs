//! First-class move types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record who placed a mark
//! where, and they are what a game's history is made of.

use super::coordinate::{Coordinate, InputError};
use super::types::Player;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Where the mark goes.
    pub coordinate: Coordinate,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coordinate: Coordinate) -> Self {
        Self { player, coordinate }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the coordinate of this move.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coordinate)
    }
}

/// Error placing a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlaceError {
    /// The coordinate is not on the 3x3 board.
    #[display("Coordinate ({}) is off the board", _0)]
    OutOfRange(Coordinate),

    /// The square already holds a mark.
    #[display("Square ({}) is already occupied", _0)]
    CellOccupied(Coordinate),
}

impl std::error::Error for PlaceError {}

/// Error that can occur when validating or applying a move.
///
/// A move error never changes the game: the same player tries again.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum MoveError {
    /// The typed move could not be read.
    #[display("{}", _0)]
    Input(InputError),

    /// The mark could not be placed.
    #[display("{}", _0)]
    Place(PlaceError),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Input(e) => Some(e),
            MoveError::Place(e) => Some(e),
            MoveError::InvariantViolation(_) => None,
        }
    }
}
