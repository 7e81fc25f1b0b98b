use std::collections::HashSet;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use super::tile::{IdAllocator, Tile, Value};
use crate::error::Error;

/// How many tiles appear after a successful move, and with which values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SpawnPolicy {
    /// One or two new tiles, always 2.
    #[default]
    Classic,
    /// `floor(size * 0.25 * r) + 1` new tiles, each one of 2, 4 or 8 with equal odds.
    Scaled,
}

impl std::fmt::Display for SpawnPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Scaled => write!(f, "scaled"),
        }
    }
}

impl FromStr for SpawnPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "scaled" => Ok(Self::Scaled),
            _ => Err(Error::InvalidSpawnPolicy(s.to_string())),
        }
    }
}

const SCALED_CARD_CHOICES: [Value; 3] = [2, 4, 8];
const SCALED_CARD_WEIGHTS: [u8; 3] = [1, 1, 1];

/// Places new tiles on empty cells of a `size` x `size` board.
#[derive(Clone, Debug)]
pub(crate) struct Spawner {
    size: usize,
    policy: SpawnPolicy,
    scaled_weighted_index: WeightedIndex<u8>,
}

impl Spawner {
    pub(crate) fn new(size: usize, policy: SpawnPolicy) -> Self {
        Self {
            size,
            policy,
            scaled_weighted_index: WeightedIndex::new(SCALED_CARD_WEIGHTS)
                .expect("SCALED_CARD_WEIGHTS should never be empty"),
        }
    }

    pub(crate) fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Append new tiles at random empty cells of `tiles` and return how many were added.
    ///
    /// The count is drawn according to the policy and clamped to the number of empty cells, so a
    /// full board is a no-op. Spawned tiles never share a cell with each other or with an
    /// existing tile.
    pub(crate) fn spawn<R: Rng + ?Sized>(
        &self,
        tiles: &mut Vec<Tile>,
        ids: &mut IdAllocator,
        rng: &mut R,
    ) -> usize {
        let cells = self.size * self.size;
        let empty = cells.saturating_sub(tiles.len());
        let count = self.spawn_count(rng).min(empty);
        if count == 0 {
            return 0;
        }

        let occupied: HashSet<usize> = tiles.iter().map(|t| t.x() + t.y() * self.size).collect();
        let free: Vec<usize> = (0..cells).filter(|i| !occupied.contains(i)).collect();
        let picked: Vec<usize> = free.choose_multiple(rng, count).copied().collect();
        for index in picked {
            let value = self.spawn_value(rng);
            let tile = Tile::new(index % self.size, index / self.size, value, ids.next_id());
            log::trace!("spawned {}", tile);
            tiles.push(tile);
        }
        count
    }

    fn spawn_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.policy {
            SpawnPolicy::Classic => rng.gen_range(1..=2),
            SpawnPolicy::Scaled => {
                (self.size as f64 * 0.25 * rng.gen::<f64>()).floor() as usize + 1
            }
        }
    }

    fn spawn_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self.policy {
            SpawnPolicy::Classic => 2,
            SpawnPolicy::Scaled => SCALED_CARD_CHOICES[self.scaled_weighted_index.sample(rng)],
        }
    }
}
