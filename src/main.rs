use std::io::stdout;
use std::path::Path;

use anyhow::Result;
use clap::Parser;

mod config;
mod engine;
mod error;
mod headless;
mod tui;
mod tui48;

use config::{Cli, Command};
use engine::board::Board;
use tui::crossterm::{Crossterm, CrosstermEvents};
use tui48::Tui48;

fn setup_logging(log_file: &Path, level: log::LevelFilter) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(level)
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

fn play(board: Board) -> error::Result<()> {
    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();
    Tui48::new(board, renderer, event_source).run()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;
    setup_logging(&config.log_file, cli.verbose.log_level_filter())?;
    log::info!("starting with {:?}", config);

    let mut board = config.board()?;
    log::debug!("{} spawn policy, starting board:\n{}", board.policy(), board);
    match config.command {
        Command::Play => play(board)?,
        Command::Moves { directions } => {
            headless::apply_moves(&mut board, &directions, &mut stdout().lock())?
        }
        Command::Auto { steps } => headless::auto_play(&mut board, steps, &mut stdout().lock())?,
    }
    Ok(())
}
