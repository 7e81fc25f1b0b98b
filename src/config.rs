use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::board::{check_size, Board};
use crate::engine::spawn::SpawnPolicy;
use crate::engine::tile::Value;
use crate::engine::transform::Direction;
use crate::error::{Error, Result};

/// Slide numbered tiles around a square board, merging equal neighbours.
#[derive(Parser, Debug)]
#[command(name = "fuse48", version, about)]
pub(crate) struct Cli {
    /// Board side length.
    #[arg(long, global = true, default_value_t = 4)]
    size: usize,

    /// How many tiles appear after each move, and with which values.
    #[arg(long, global = true, default_value_t = SpawnPolicy::Classic)]
    spawn_policy: SpawnPolicy,

    /// Start from these tiles instead of two random ones, e.g. "0,0,2;1,0,4".
    #[arg(long, global = true, value_name = "X,Y,VALUE;...")]
    tiles: Option<String>,

    /// Seed the random number generator for a repeatable game.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Where log output goes; the terminal belongs to the game.
    #[arg(long, global = true, default_value = "./fuse48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    /// Play interactively in the terminal (the default).
    Play,
    /// Apply moves without the terminal UI, printing the board after each one.
    Moves {
        /// Directions to apply in order: up, down, left, right (also u, d, l, r).
        #[arg(required = true)]
        directions: Vec<Direction>,
    },
    /// Let auto-play pick moves, printing the board after each one.
    Auto {
        /// Number of moves to attempt.
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
}

/// Validated settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) size: usize,
    pub(crate) spawn_policy: SpawnPolicy,
    pub(crate) tiles: Option<Vec<(usize, usize, Value)>>,
    pub(crate) seed: Option<u64>,
    pub(crate) log_file: PathBuf,
    pub(crate) command: Command,
}

impl Cli {
    pub(crate) fn config(&self) -> Result<Config> {
        Ok(Config {
            size: check_size(self.size)?,
            spawn_policy: self.spawn_policy,
            tiles: self.tiles.as_deref().map(parse_cells).transpose()?,
            seed: self.seed,
            log_file: self.log_file.clone(),
            command: self.command.clone().unwrap_or(Command::Play),
        })
    }
}

impl Config {
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// A fresh board, or one holding exactly the `--tiles` cells when given.
    pub(crate) fn board(&self) -> Result<Board> {
        match &self.tiles {
            Some(cells) => Board::from_tiles(self.size, self.spawn_policy, cells, self.rng()),
            None => Board::new(self.size, self.spawn_policy, self.rng()),
        }
    }
}

/// Parse `x,y,value` triples separated by `;`. Bounds and values are checked by the board.
fn parse_cells(s: &str) -> Result<Vec<(usize, usize, Value)>> {
    s.split(';')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| -> Result<(usize, usize, Value)> {
            let invalid = || Error::InvalidCell(cell.to_string());
            let parts: Vec<&str> = cell.split(',').map(str::trim).collect();
            let [x, y, value] = parts.as_slice() else {
                return Err(invalid());
            };
            Ok((
                x.parse::<usize>().map_err(|_| invalid())?,
                y.parse::<usize>().map_err(|_| invalid())?,
                value.parse::<Value>().map_err(|_| invalid())?,
            ))
        })
        .collect()
}
