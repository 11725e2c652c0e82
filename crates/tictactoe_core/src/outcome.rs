//! Evaluation outcomes.
//!
//! Every classification of a board, terminal or not, is a value of
//! [`Evaluation`]. Callers branch on the variant; only an impossible state
//! is turned into an error, via [`Evaluation::into_result`].

use super::types::Player;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Why a board cannot have come from alternating play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Mark counts differ by more than one.
    #[display("X has {x_count} marks and O has {o_count}")]
    ImpossibleState {
        /// Number of X marks.
        x_count: usize,
        /// Number of O marks.
        o_count: usize,
    },

    /// Both players hold three in a row.
    #[display("both players have three in a row")]
    DoubleWin,
}

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    /// Moves remain and nobody has won.
    InProgress,
    /// A player has three in a row.
    Win {
        /// The winning player.
        winner: Player,
    },
    /// Board full, no winner.
    Draw,
    /// Unreachable under alternating play.
    Invalid {
        /// What makes the board impossible.
        reason: InvalidReason,
    },
}

impl Evaluation {
    /// Returns true for every outcome except [`Evaluation::InProgress`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Evaluation::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Evaluation::Win { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Evaluation::Draw)
    }

    /// Splits off impossible states as a hard error.
    pub fn into_result(self) -> Result<Self, ImpossibleGameState> {
        match self {
            Evaluation::Invalid { reason } => Err(ImpossibleGameState::new(reason)),
            other => Ok(other),
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::InProgress => write!(f, "In progress"),
            Evaluation::Win { winner } => write!(f, "{} wins", winner),
            Evaluation::Draw => write!(f, "Draw"),
            Evaluation::Invalid { reason } => write!(f, "Impossible game state: {}", reason),
        }
    }
}

/// Fatal error: the board could not have been reached by alternating play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Impossible game state: {}", reason)]
pub struct ImpossibleGameState {
    reason: InvalidReason,
}

impl ImpossibleGameState {
    /// Wraps the reason the board was rejected.
    pub fn new(reason: InvalidReason) -> Self {
        Self { reason }
    }

    /// Returns the reason the board was rejected.
    pub fn reason(&self) -> InvalidReason {
        self.reason
    }
}

impl std::error::Error for ImpossibleGameState {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(!Evaluation::InProgress.is_terminal());
        assert!(Evaluation::Draw.is_terminal());
        assert!(Evaluation::Win { winner: Player::O }.is_terminal());
        assert!(Evaluation::Invalid { reason: InvalidReason::DoubleWin }.is_terminal());
    }

    #[test]
    fn test_display_final_lines() {
        assert_eq!(Evaluation::Win { winner: Player::X }.to_string(), "X wins");
        assert_eq!(Evaluation::Win { winner: Player::O }.to_string(), "O wins");
        assert_eq!(Evaluation::Draw.to_string(), "Draw");
    }

    #[test]
    fn test_into_result_rejects_invalid() {
        let reason = InvalidReason::ImpossibleState { x_count: 3, o_count: 1 };
        let err = Evaluation::Invalid { reason }.into_result().unwrap_err();
        assert_eq!(err.reason(), reason);
        assert_eq!(Evaluation::Draw.into_result(), Ok(Evaluation::Draw));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Evaluation::Win { winner: Player::X }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "win", "winner": "X" }));

        let json = serde_json::to_value(Evaluation::Invalid {
            reason: InvalidReason::DoubleWin,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "invalid", "reason": { "kind": "double_win" } })
        );
    }
}
