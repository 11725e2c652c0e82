//! Console tic-tac-toe - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use console_tictactoe::{ConsoleSession, GameConfig, Report, SessionEnd};
use std::io::Write;
use tictactoe_core::Board;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    init_tracing(config.log_filter());
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Play { first, board, hints } => {
            let mut config = config;
            if let Some(first) = first {
                config = config.with_first_player(first);
            }
            if hints {
                config = config.with_show_hints(true);
            }
            run_play(config, board)
        }
        Command::Replay {
            moves,
            first,
            board,
            format,
        } => {
            let first = first.unwrap_or(*config.first_player());
            let report = Report::replay(board.unwrap_or_default(), first, &moves)
                .context("Replay stopped at a rejected move")?;
            emit(&report, format, &config)
        }
        Command::Evaluate { board, format } => emit(&Report::from_board(board), format, &config),
    }
}

/// Logs go to stderr so stdout stays the game surface.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: GameConfig, board: Option<Board>) -> Result<()> {
    info!(first_player = %config.first_player(), "Starting console game");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = ConsoleSession::new(stdin.lock(), stdout.lock(), config);

    let end = match board {
        Some(board) => session.play_from(board)?,
        None => session.play()?,
    };
    match end {
        SessionEnd::Finished(outcome) => info!(%outcome, "Game over"),
        SessionEnd::Abandoned => info!("Game abandoned"),
    }
    Ok(())
}

/// Print a report and fail on impossible boards
fn emit(report: &Report, format: OutputFormat, config: &GameConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => report.write_text(&mut out, *config.show_hints())?,
        OutputFormat::Json => report.write_json(&mut out)?,
    }
    out.flush()?;

    report.verdict()?;
    Ok(())
}
