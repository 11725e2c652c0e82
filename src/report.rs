//! Non-interactive results for the `replay` and `evaluate` commands.

use crate::session::write_board;
use serde::Serialize;
use std::io::Write;
use tictactoe_core::{
    evaluate, Board, Coordinate, Evaluation, GameInProgress, GameResult, ImpossibleGameState,
    MoveError, Player,
};
use tracing::{debug, instrument};

/// Final board and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Compact board text.
    board: String,
    /// Moves applied in this run.
    moves: usize,
    /// Classification of the final board.
    outcome: Evaluation,
    #[serde(skip)]
    final_board: Board,
}

impl Report {
    /// Classifies a board as-is.
    #[instrument(skip(board), fields(board = %board))]
    pub fn from_board(board: Board) -> Self {
        let outcome = evaluate(&board);
        Self {
            board: board.to_string(),
            moves: 0,
            outcome,
            final_board: board,
        }
    }

    /// Applies moves to `start`, stopping at the first terminal state.
    ///
    /// Moves after a terminal state are ignored. A rejected move is an error.
    #[instrument(skip(start, moves), fields(start = %start, moves = moves.len()))]
    pub fn replay(start: Board, first_player: Player, moves: &[Coordinate]) -> Result<Self, MoveError> {
        let result = match GameInProgress::resume(start, first_player) {
            GameResult::InProgress(game) => game.replay(moves)?,
            finished @ GameResult::Finished(_) => {
                debug!("Start board already terminal, no moves applied");
                finished
            }
        };

        let applied = match &result {
            GameResult::InProgress(game) => game.history().len(),
            GameResult::Finished(game) => game.history().len(),
        };
        let board = result.board().clone();
        Ok(Self {
            board: board.to_string(),
            moves: applied,
            outcome: result.evaluation(),
            final_board: board,
        })
    }

    /// Classification of the final board.
    pub fn outcome(&self) -> Evaluation {
        self.outcome
    }

    /// Outcome a command may exit cleanly on.
    ///
    /// Wins, draws and unfinished boards pass; an impossible board is an
    /// error, which the binary turns into a failing exit status.
    pub fn verdict(&self) -> Result<Evaluation, ImpossibleGameState> {
        self.outcome.into_result()
    }

    /// Number of moves applied.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// The final board.
    pub fn board(&self) -> &Board {
        &self.final_board
    }

    /// Writes the framed board and the outcome line.
    pub fn write_text(&self, output: &mut impl Write, hints: bool) -> std::io::Result<()> {
        write_board(output, &self.final_board, hints)?;
        writeln!(output, "{}", self.outcome)
    }

    /// Writes the report as one line of JSON.
    pub fn write_json(&self, output: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer(&mut *output, self)?;
        writeln!(output)
    }
}
