//! Console tic-tac-toe.
//!
//! Two players share one terminal and take turns typing `"<row> <col>"`.
//! Game logic lives in [`tictactoe_core`]; this crate adds configuration,
//! the console loop, and non-interactive reports.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod report;
mod session;

pub use config::{ConfigError, GameConfig};
pub use report::Report;
pub use session::{write_board, ConsoleSession, SessionEnd, SessionError, SEPARATOR};
