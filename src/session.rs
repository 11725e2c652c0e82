//! Console game loop.
//!
//! Reads one move per line, renders the board after every accepted move, and
//! stops on the first terminal evaluation. Rejected input is reported and the
//! same player is asked again.

use crate::config::GameConfig;
use derive_more::{Display, Error};
use derive_new::new;
use std::io::{BufRead, Write};
use tictactoe_core::{
    parse_move, Board, Evaluation, GameInProgress, GameResult, GameSetup, ImpossibleGameState,
};
use tracing::{debug, error, info, instrument, warn};

/// Fixed-width line drawn above, between, and below board rows.
pub const SEPARATOR: &str = "+---+---+---+";

/// Words that end the session early.
const QUIT_COMMANDS: [&str; 2] = ["q", "quit"];

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game reached a win or a draw.
    Finished(Evaluation),
    /// A player typed `quit`.
    Abandoned,
}

/// Error that ends a session.
#[derive(Debug, Display, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[display("Console I/O failed: {}", _0)]
    Io(std::io::Error),

    /// Input ran out before the game ended.
    #[display("Input closed before the game ended")]
    InputClosed,

    /// The board could not have come from alternating play.
    #[display("{}", _0)]
    Impossible(ImpossibleGameState),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err)
    }
}

impl From<ImpossibleGameState> for SessionError {
    fn from(err: ImpossibleGameState) -> Self {
        SessionError::Impossible(err)
    }
}

/// Writes the board framed by [`SEPARATOR`] lines.
pub fn write_board(output: &mut impl Write, board: &Board, hints: bool) -> std::io::Result<()> {
    let rows = if hints {
        board.render_hinted()
    } else {
        board.render()
    };
    writeln!(output, "{}", SEPARATOR)?;
    for row in rows {
        writeln!(output, "{}", row)?;
        writeln!(output, "{}", SEPARATOR)?;
    }
    Ok(())
}

/// A game played over a line-based reader and a writer.
#[derive(Debug, new)]
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    config: GameConfig,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    /// Plays a fresh game on an empty board.
    pub fn play(&mut self) -> Result<SessionEnd, SessionError> {
        let game = GameSetup::new().start(*self.config.first_player());
        self.run(GameResult::InProgress(game))
    }

    /// Plays on from an existing board.
    pub fn play_from(&mut self, board: Board) -> Result<SessionEnd, SessionError> {
        let start = GameInProgress::resume(board, *self.config.first_player());
        self.run(start)
    }

    /// Drives the game until it finishes, the input ends, or a player quits.
    #[instrument(skip_all)]
    pub fn run(&mut self, start: GameResult) -> Result<SessionEnd, SessionError> {
        self.show(start.board())?;

        let mut game = match start {
            GameResult::InProgress(game) => game,
            GameResult::Finished(game) => return self.finish(*game.outcome()),
        };

        loop {
            let player = game.to_move();
            write!(self.output, "Player {}, enter row and column (1-3): ", player)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                warn!(%player, "Input closed mid-game");
                writeln!(self.output)?;
                return Err(SessionError::InputClosed);
            };
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if QUIT_COMMANDS.contains(&line.to_ascii_lowercase().as_str()) {
                info!(%player, "Player quit");
                writeln!(self.output, "Game abandoned")?;
                return Ok(SessionEnd::Abandoned);
            }

            let coordinate = match parse_move(line) {
                Ok(coordinate) => coordinate,
                Err(e) => {
                    debug!(input = %line, error = %e, "Unreadable move");
                    writeln!(self.output, "Invalid move: {}", e)?;
                    continue;
                }
            };

            match game.make_move(coordinate) {
                Ok(GameResult::InProgress(next)) => {
                    self.show(next.board())?;
                    game = next;
                }
                Ok(GameResult::Finished(done)) => {
                    self.show(done.board())?;
                    return self.finish(*done.outcome());
                }
                Err(rejected) => {
                    writeln!(self.output, "Invalid move: {}", rejected.error())?;
                    game = rejected.into_game();
                }
            }
        }
    }

    /// Returns the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Bytes that are not UTF-8 become replacement characters, which the
    /// move parser then rejects like any other non-digit token.
    fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut buf = Vec::new();
        let read = self.input.read_until(b'\n', &mut buf)?;
        Ok((read > 0).then(|| String::from_utf8_lossy(&buf).into_owned()))
    }

    fn show(&mut self, board: &Board) -> Result<(), SessionError> {
        write_board(&mut self.output, board, *self.config.show_hints())?;
        Ok(())
    }

    fn finish(&mut self, outcome: Evaluation) -> Result<SessionEnd, SessionError> {
        match outcome.into_result() {
            Ok(outcome) => {
                info!(%outcome, "Session finished");
                writeln!(self.output, "{}", outcome)?;
                Ok(SessionEnd::Finished(outcome))
            }
            Err(e) => {
                error!(error = %e, "Session aborted");
                writeln!(self.output, "Error: {}", e)?;
                Err(e.into())
            }
        }
    }
}
