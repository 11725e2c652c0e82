//! Phase-specific typestate structs for tic-tac-toe.
//!
//! Each phase is its own type. A `GameFinished` ALWAYS carries a terminal
//! evaluation, and only a `GameInProgress` accepts moves, so no move can
//! follow a win, draw, or impossible state.

use super::action::{Move, MoveError};
use super::coordinate::Coordinate;
#[cfg(debug_assertions)]
use super::invariants::{InvariantSet, TicTacToeInvariants};
use super::outcome::Evaluation;
use super::rules;
use super::{Board, Player};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - not started.
///
/// The board is always empty.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game with the first player (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        info!(%first_player, "Game started");
        GameInProgress {
            initial: self.board.clone(),
            board: self.board,
            history: Vec::new(),
            to_move: first_player,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - accepts moves.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) initial: Board,
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
}

impl GameInProgress {
    /// Resumes play from an arbitrary board.
    ///
    /// The board is evaluated first, so a board that is already won, drawn,
    /// or impossible comes back finished. Otherwise the player with fewer
    /// marks moves next, `first_player` on equal counts.
    #[instrument(skip(board), fields(board = %board))]
    pub fn resume(board: Board, first_player: Player) -> GameResult {
        let evaluation = rules::evaluate(&board);
        if evaluation.is_terminal() {
            info!(%evaluation, "Resumed board is already terminal");
            return GameResult::Finished(GameFinished {
                board,
                history: Vec::new(),
                outcome: evaluation,
            });
        }

        let to_move = board.next_player(first_player);
        debug!(%to_move, "Resuming game");
        GameResult::InProgress(GameInProgress {
            initial: board.clone(),
            board,
            history: Vec::new(),
            to_move,
        })
    }

    /// Places the current player's mark, consuming self and transitioning to
    /// the next state.
    ///
    /// A rejected move hands the unchanged game back inside [`RejectedMove`];
    /// the same player moves again.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(self, coordinate: Coordinate) -> Result<GameResult, RejectedMove> {
        #[cfg(debug_assertions)]
        let before = self.clone();
        let player = self.to_move;

        let mut game = self;
        if let Err(e) = game.board.place(coordinate, player) {
            warn!(%coordinate, error = %e, "Move rejected");
            return Err(RejectedMove::new(game, e.into()));
        }
        game.history.push(Move::new(player, coordinate));
        info!(%coordinate, "Move accepted");

        let evaluation = rules::evaluate(&game.board);
        if evaluation.is_terminal() {
            info!(%evaluation, moves = game.history.len(), "Game finished");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                outcome: evaluation,
            }));
        }

        game.to_move = player.opponent();

        // Postcondition: verify invariants in debug builds
        #[cfg(debug_assertions)]
        if let Err(violations) = TicTacToeInvariants::check_all(&game) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            return Err(RejectedMove::new(
                before,
                MoveError::InvariantViolation(descriptions),
            ));
        }

        Ok(GameResult::InProgress(game))
    }

    /// Applies moves in order, stopping at the first terminal state.
    ///
    /// A rejected move aborts the replay with its error.
    #[instrument(skip(self))]
    pub fn replay(self, moves: &[Coordinate]) -> Result<GameResult, MoveError> {
        let mut game = self;

        for coordinate in moves {
            match game.make_move(*coordinate).map_err(RejectedMove::into_error)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board the game started from.
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the empty coordinates, row-major.
    pub fn valid_moves(&self) -> Vec<Coordinate> {
        self.board.empty_cells().collect()
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
///
/// The outcome is always terminal: a win, a draw, or an impossible state.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Evaluation,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Evaluation {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Restarts the game (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Results
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

impl GameResult {
    /// Returns the board in either phase.
    pub fn board(&self) -> &Board {
        match self {
            GameResult::InProgress(g) => g.board(),
            GameResult::Finished(g) => g.board(),
        }
    }

    /// Returns the evaluation of the board in either phase.
    pub fn evaluation(&self) -> Evaluation {
        match self {
            GameResult::InProgress(_) => Evaluation::InProgress,
            GameResult::Finished(g) => *g.outcome(),
        }
    }
}

/// A move that was not applied, with the untouched game to retry on.
#[derive(Debug)]
pub struct RejectedMove {
    game: GameInProgress,
    error: MoveError,
}

impl RejectedMove {
    fn new(game: GameInProgress, error: MoveError) -> Self {
        Self { game, error }
    }

    /// Why the move was rejected.
    pub fn error(&self) -> &MoveError {
        &self.error
    }

    /// Takes back the game, unchanged.
    pub fn into_game(self) -> GameInProgress {
        self.game
    }

    /// Drops the game and keeps the error.
    pub fn into_error(self) -> MoveError {
        self.error
    }

    /// Splits into the game and the error.
    pub fn into_parts(self) -> (GameInProgress, MoveError) {
        (self.game, self.error)
    }
}

impl std::fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for RejectedMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::PlaceError;

    #[test]
    fn test_turn_passes_after_accepted_move() {
        let game = GameSetup::new().start(Player::X);
        match game.make_move(Coordinate::new(1, 1)).unwrap() {
            GameResult::InProgress(g) => assert_eq!(g.to_move(), Player::O),
            GameResult::Finished(_) => panic!("Game shouldn't finish after one move"),
        }
    }

    #[test]
    fn test_rejected_move_keeps_turn_and_board() {
        let game = match GameSetup::new().start(Player::X).make_move(Coordinate::new(0, 0)) {
            Ok(GameResult::InProgress(g)) => g,
            other => panic!("Unexpected {:?}", other),
        };
        let board_before = game.board().clone();

        let rejected = game.make_move(Coordinate::new(0, 0)).unwrap_err();
        assert_eq!(
            rejected.error(),
            &MoveError::Place(PlaceError::CellOccupied(Coordinate::new(0, 0)))
        );
        let game = rejected.into_game();
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.to_move(), Player::O);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_off_board_move_rejected() {
        let game = GameSetup::new().start(Player::X);
        let rejected = game.make_move(Coordinate::new(0, 3)).unwrap_err();
        assert!(matches!(
            rejected.error(),
            MoveError::Place(PlaceError::OutOfRange(_))
        ));
        assert!(rejected.into_game().history().is_empty());
    }

    #[test]
    fn test_resume_infers_player() {
        let board: Board = "X../.../...".parse().unwrap();
        match GameInProgress::resume(board, Player::X) {
            GameResult::InProgress(g) => {
                assert_eq!(g.to_move(), Player::O);
                assert!(g.history().is_empty());
            }
            GameResult::Finished(_) => panic!("Board is not terminal"),
        }
    }

    #[test]
    fn test_resume_terminal_board_finishes() {
        let board: Board = "XXX/OOO/...".parse().unwrap();
        let result = GameInProgress::resume(board, Player::X);
        assert!(matches!(
            result.evaluation(),
            Evaluation::Invalid { .. }
        ));
    }

    #[test]
    fn test_valid_moves_filters_occupied() {
        let game = GameSetup::new().start(Player::X);
        assert_eq!(game.valid_moves().len(), 9);

        let game = match game.replay(&[Coordinate::new(0, 0), Coordinate::new(1, 1)]) {
            Ok(GameResult::InProgress(g)) => g,
            other => panic!("Unexpected {:?}", other),
        };
        let valid = game.valid_moves();
        assert_eq!(valid.len(), 7);
        assert!(!valid.contains(&Coordinate::new(0, 0)));
        assert!(!valid.contains(&Coordinate::new(1, 1)));
    }
}
