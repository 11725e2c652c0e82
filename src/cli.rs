//! Command-line interface for console_tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_core::{Board, Coordinate, Player};

/// Console tic-tac-toe for two players
#[derive(Parser, Debug)]
#[command(name = "console_tictactoe")]
#[command(about = "Two-player tic-tac-toe on the console", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for non-interactive commands.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Framed board followed by the outcome line
    #[default]
    Text,
    /// One JSON object
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on stdin/stdout
    Play {
        /// Player who moves first (x or o)
        #[arg(long)]
        first: Option<Player>,

        /// Start from this board instead of an empty one (e.g. "X../.O./...")
        #[arg(long)]
        board: Option<Board>,

        /// Label empty squares with their cell number
        #[arg(long)]
        hints: bool,
    },

    /// Apply one-based moves ("2,2" or "2 2") and report the result
    Replay {
        /// Moves in play order
        #[arg(required = true)]
        moves: Vec<Coordinate>,

        /// Player who moves first (x or o)
        #[arg(long)]
        first: Option<Player>,

        /// Start from this board instead of an empty one
        #[arg(long)]
        board: Option<Board>,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Classify a board given as text (X, O, and . in row-major order)
    Evaluate {
        /// Board text, e.g. "XOX/.O./..X"
        board: Board,

        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}
