//! Pure tic-tac-toe game logic.
//!
//! No I/O happens here: the board, move parsing, the evaluator, and the
//! typestate game lifecycle are all plain values.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{evaluate, parse_move, Board, Evaluation, Player};
//!
//! let mut board = Board::new();
//! board.place(parse_move("2 2")?, Player::X)?;
//! assert_eq!(evaluate(&board), Evaluation::InProgress);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod coordinate;
pub mod invariants;
mod outcome;
pub mod rules;
mod typestate;
mod types;

pub use action::{Move, MoveError, PlaceError};
pub use coordinate::{parse_move, Coordinate, InputError, SIZE};
pub use outcome::{Evaluation, ImpossibleGameState, InvalidReason};
pub use rules::evaluate;
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup, RejectedMove};
pub use types::{Board, BoardParseError, Player, Square};
