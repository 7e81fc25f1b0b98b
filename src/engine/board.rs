use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::RngCore;

use super::change::has_changed;
use super::hint::AnimationHint;
use super::spawn::{SpawnPolicy, Spawner};
use super::tile::{check_value, IdAllocator, Tile, Value};
use super::transform::{transform, Direction};
use crate::error::{Error, Result};

pub(crate) const MIN_SIZE: usize = 2;
pub(crate) const MAX_SIZE: usize = 8;

const STARTING_TILES: usize = 2;
const STARTING_VALUE: Value = 2;

/// The result of trying a move without committing it.
#[derive(Clone, Debug)]
pub(crate) struct MoveOutcome {
    pub(crate) direction: Direction,
    pub(crate) changed: bool,
    pub(crate) tiles: Vec<Tile>,
}

/// Board represents a 2048 board along with everything needed to play it: the live tiles, the id
/// allocator for new tiles, the spawn policy and the random number generator.
pub(crate) struct Board {
    size: usize,
    tiles: Vec<Tile>,
    ids: IdAllocator,
    spawner: Spawner,
    rng: Box<dyn RngCore>,
    moves: usize,
}

impl Board {
    /// Initialize a new board with two starting tiles, using the given random number generator.
    pub(crate) fn new(
        size: usize,
        policy: SpawnPolicy,
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        check_size(size)?;
        let mut board = Self {
            size,
            tiles: Vec::with_capacity(size * size),
            ids: IdAllocator::new(),
            spawner: Spawner::new(size, policy),
            rng: Box::new(rng),
            moves: 0,
        };
        board.seed();
        log::info!("new {0}x{0} board with {1} spawn policy", size, policy);
        Ok(board)
    }

    /// Initialize a board holding exactly the given `(x, y, value)` tiles, in that order.
    pub(crate) fn from_tiles(
        size: usize,
        policy: SpawnPolicy,
        cells: &[(usize, usize, Value)],
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        check_size(size)?;
        let mut ids = IdAllocator::new();
        let mut occupied = HashSet::with_capacity(cells.len());
        let mut tiles = Vec::with_capacity(size * size);
        for &(x, y, value) in cells {
            if x >= size || y >= size {
                return Err(Error::TileOutOfBounds { x, y, size });
            }
            check_value(value)?;
            if !occupied.insert((x, y)) {
                return Err(Error::CellOccupied(x, y));
            }
            tiles.push(Tile::new(x, y, value, ids.next_id()));
        }
        Ok(Self {
            size,
            tiles,
            ids,
            spawner: Spawner::new(size, policy),
            rng: Box::new(rng),
            moves: 0,
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn policy(&self) -> SpawnPolicy {
        self.spawner.policy()
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.x() == x && t.y() == y)
    }

    pub(crate) fn max_value(&self) -> Value {
        self.tiles.iter().map(|t| t.value()).max().unwrap_or(0)
    }

    /// Number of committed moves since the board was created or reset.
    pub(crate) fn moves(&self) -> usize {
        self.moves
    }

    /// Work out what moving in `direction` would do, without touching the live tiles.
    ///
    /// The move runs on a copy of the tiles. If nothing slid or merged the outcome is unchanged
    /// and carries the current tiles; otherwise new tiles are spawned into the copy. Spawning
    /// consumes ids and randomness even if the outcome is never committed.
    pub(crate) fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        let working: Vec<Tile> = self.tiles.iter().map(Tile::duplicate).collect();
        let mut tiles = transform(working, self.size, direction);
        if !has_changed(&self.tiles, &tiles) {
            log::debug!("moving {} changes nothing", direction);
            return MoveOutcome {
                direction,
                changed: false,
                tiles: self.tiles.clone(),
            };
        }
        let spawned = self.spawner.spawn(&mut tiles, &mut self.ids, &mut self.rng);
        log::debug!("moving {} spawned {} tile(s)", direction, spawned);
        MoveOutcome {
            direction,
            changed: true,
            tiles,
        }
    }

    /// Publish a changed outcome as the live board. Unchanged outcomes are ignored.
    pub(crate) fn commit(&mut self, outcome: MoveOutcome) -> Option<AnimationHint> {
        if !outcome.changed {
            return None;
        }
        let hint = AnimationHint::between(&self.tiles, &outcome.tiles);
        log::trace!(
            "committing {} with {} tile change(s):{}",
            outcome.direction,
            hint.hints().len(),
            hint
        );
        self.tiles = outcome.tiles;
        self.moves += 1;
        Some(hint)
    }

    /// shift attempts to shift the board in the given direction and returns an AnimationHint
    /// if anything changes.
    pub(crate) fn shift(&mut self, direction: Direction) -> Option<AnimationHint> {
        let outcome = self.attempt_move(direction);
        self.commit(outcome)
    }

    /// Try all four directions in random order and commit the first one that changes the board.
    /// Returns `None` and leaves the board alone if no direction does.
    pub(crate) fn auto_play(&mut self) -> Option<(Direction, AnimationHint)> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        for direction in directions {
            if let Some(hint) = self.shift(direction) {
                return Some((direction, hint));
            }
        }
        log::debug!("auto-play found no direction that changes the board");
        None
    }

    /// Throw away every tile and start over on a `size` x `size` board with fresh ids.
    pub(crate) fn reset(&mut self, size: usize) -> Result<()> {
        check_size(size)?;
        self.size = size;
        self.spawner = Spawner::new(size, self.spawner.policy());
        self.ids = IdAllocator::new();
        self.tiles = Vec::with_capacity(size * size);
        self.moves = 0;
        self.seed();
        log::info!("board reset to {0}x{0}", size);
        Ok(())
    }

    fn seed(&mut self) {
        let cells: Vec<usize> = (0..self.size * self.size).collect();
        for index in cells.choose_multiple(&mut self.rng, STARTING_TILES) {
            let (x, y) = (index % self.size, index / self.size);
            self.tiles.push(Tile::new(x, y, STARTING_VALUE, self.ids.next_id()));
        }
    }
}

pub(crate) fn check_size(size: usize) -> Result<usize> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(Error::InvalidBoardSize(size, MIN_SIZE, MAX_SIZE))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_value().max(1).to_string().len();
        for y in 0..self.size {
            let row = (0..self.size)
                .map(|x| match self.tile_at(x, y) {
                    Some(t) => format!("{:>width$}", t.value(), width = width),
                    None => format!("{:>width$}", ".", width = width),
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rstest::*;

    use super::*;
    use crate::engine::tile::{Idx, MAX_VALUE};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn board(size: usize, cells: &[(usize, usize, Value)]) -> Board {
        Board::from_tiles(size, SpawnPolicy::Classic, cells, rng()).expect("valid test board")
    }

    fn sorted(tiles: &[Tile]) -> Vec<Tile> {
        let mut tiles = tiles.to_vec();
        tiles.sort_by(Tile::cmp_by_id);
        tiles
    }

    fn assert_settled(board: &Board) {
        let n = board.size();
        assert!(board.tiles().len() <= n * n);
        let cells: HashSet<Idx> = board.tiles().iter().map(|t| t.idx()).collect();
        assert_eq!(cells.len(), board.tiles().len(), "overlapping tiles:\n{}", board);
        let ids: HashSet<_> = board.tiles().iter().map(|t| t.id()).collect();
        assert_eq!(ids.len(), board.tiles().len());
        for t in board.tiles() {
            assert!(t.x() < n && t.y() < n);
            assert!(check_value(t.value()).is_ok());
        }
    }

    #[test]
    fn new_board_has_two_starting_tiles() {
        let _ = env_logger::builder().is_test(true).try_init();
        for seed in 0..20 {
            let board = Board::new(4, SpawnPolicy::Classic, SmallRng::seed_from_u64(seed))
                .expect("valid size");
            assert_eq!(board.tiles().len(), STARTING_TILES);
            assert!(board.tiles().iter().all(|t| t.value() == STARTING_VALUE));
            assert_settled(&board);
        }
    }

    #[rstest]
    #[case::too_small(1)]
    #[case::too_big(9)]
    fn invalid_size_is_rejected(#[case] size: usize) {
        assert!(matches!(
            Board::new(size, SpawnPolicy::Classic, rng()),
            Err(Error::InvalidBoardSize(s, MIN_SIZE, MAX_SIZE)) if s == size
        ));
    }

    #[test]
    fn from_tiles_validates_cells() {
        let policy = SpawnPolicy::Classic;
        assert!(matches!(
            Board::from_tiles(4, policy, &[(4, 0, 2)], rng()),
            Err(Error::TileOutOfBounds { x: 4, y: 0, size: 4 })
        ));
        assert!(matches!(
            Board::from_tiles(4, policy, &[(0, 0, 3)], rng()),
            Err(Error::InvalidTileValue(3))
        ));
        assert!(matches!(
            Board::from_tiles(4, policy, &[(1, 1, 2), (1, 1, 4)], rng()),
            Err(Error::CellOccupied(1, 1))
        ));
    }

    #[test]
    fn merge_up_spawns_and_reports_change() {
        let mut board = board(4, &[(0, 0, 2), (0, 1, 2)]);
        let before = board.tiles().to_vec();
        let outcome = board.attempt_move(Direction::Up);

        assert!(outcome.changed);
        assert!(outcome.tiles.contains(&Tile::new(0, 0, 4, before[1].id())));
        let spawned: Vec<_> = outcome.tiles.iter().filter(|t| t.value() == 2).collect();
        assert!((1..=2).contains(&spawned.len()));
        assert!(spawned.iter().all(|t| t.idx() != Idx(0, 0)));
        // attempting alone never commits
        assert_eq!(board.tiles(), &before[..]);
    }

    #[test]
    fn compacted_column_reports_no_change() {
        let mut board = board(4, &[(0, 0, 2), (0, 1, 4)]);
        let outcome = board.attempt_move(Direction::Up);
        assert!(!outcome.changed);
        assert_eq!(sorted(&outcome.tiles), sorted(board.tiles()));
        assert!(board.commit(outcome).is_none());
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn locked_board_never_changes() {
        let mut board = board(2, &[(0, 0, 2), (1, 0, 4), (0, 1, 4), (1, 1, 2)]);
        for direction in Direction::ALL {
            let outcome = board.attempt_move(direction);
            assert!(!outcome.changed, "moving {}", direction);
        }
        assert!(board.auto_play().is_none());
        assert_eq!(board.tiles().len(), 4);
    }

    #[test]
    fn unchanged_outcome_matches_input() {
        let mut r = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut board = Board::new(4, SpawnPolicy::Scaled, SmallRng::seed_from_u64(r.gen()))
                .expect("valid size");
            for _ in 0..30 {
                let direction = Direction::ALL[r.gen_range(0..4)];
                let before = sorted(board.tiles());
                let outcome = board.attempt_move(direction);
                if !outcome.changed {
                    let after = sorted(&outcome.tiles);
                    assert_eq!(before, after);
                    assert!(before.iter().zip(&after).all(|(b, a)| b.id() == a.id()));
                }
                board.commit(outcome);
            }
        }
    }

    #[rstest]
    #[case::classic(SpawnPolicy::Classic)]
    #[case::scaled(SpawnPolicy::Scaled)]
    fn random_play_keeps_board_settled(#[case] policy: SpawnPolicy) {
        let mut board = Board::new(4, policy, rng()).expect("valid size");
        let mut moves = 0;
        while let Some((direction, hint)) = board.auto_play() {
            moves += 1;
            assert!(!hint.is_empty(), "moving {} produced no hint", direction);
            assert_settled(&board);
            if moves == 500 {
                break;
            }
        }
        assert_eq!(board.moves(), moves);
        assert_settled(&board);
    }

    #[test]
    fn tile_order_does_not_change_the_result() {
        let cells = [(0, 0, 2), (1, 0, 2), (3, 0, 4), (2, 2, 8), (2, 3, 8), (1, 3, 2)];
        let mut reversed = cells;
        reversed.reverse();
        for direction in Direction::ALL {
            let mut a = board(4, &cells);
            let mut b = board(4, &reversed);
            a.shift(direction);
            b.shift(direction);
            assert_eq!(a.to_string(), b.to_string(), "shifting {}", direction);
        }
    }

    #[test]
    fn shift_commits_and_returns_hint() {
        let mut board = board(4, &[(3, 0, 2)]);
        let id = board.tiles()[0].id();
        let hint = board.shift(Direction::Left).expect("tile slides left");
        assert_eq!(board.moves(), 1);
        assert_eq!(board.tile_at(0, 0).map(|t| t.id()), Some(id));
        assert!(hint
            .hints()
            .iter()
            .any(|(hid, from, _)| *hid == id && *from == Idx(3, 0)));
    }

    #[test]
    fn stale_lineage_is_cleared_by_the_next_move() {
        let mut board = board(4, &[(0, 0, 2), (1, 0, 2)]);
        board.shift(Direction::Left).expect("tiles merge");
        let merged = board.tile_at(0, 0).cloned().expect("merged tile sits in the corner");
        assert!(merged.fused_with().is_some());
        let outcome = board.attempt_move(Direction::Right);
        assert!(outcome.changed);
        let moved = outcome
            .tiles
            .iter()
            .find(|t| t.id() == merged.id())
            .expect("the merged tile survives");
        assert_eq!(moved.fused_with(), None);
    }

    #[test]
    fn auto_play_commits_a_changing_direction() {
        let mut board = board(4, &[(0, 0, 2)]);
        let (direction, _) = board.auto_play().expect("a lone tile can always move");
        assert!(matches!(direction, Direction::Down | Direction::Right));
        assert_eq!(board.moves(), 1);
        assert!(board.tiles().len() >= 2);
    }

    #[test]
    fn reset_starts_a_fresh_session() {
        let mut board = board(4, &[(0, 0, 2), (1, 0, 4), (2, 0, 8)]);
        board.shift(Direction::Down);
        board.reset(5).expect("valid size");
        assert_eq!(board.size(), 5);
        assert_eq!(board.moves(), 0);
        assert_eq!(board.tiles().len(), STARTING_TILES);
        assert_eq!(board.policy(), SpawnPolicy::Classic);
        let mut fresh = IdAllocator::new();
        let first = fresh.next_id();
        assert_eq!(board.tiles()[0].id(), first);
        assert!(board.reset(0).is_err());
    }

    #[test]
    fn largest_tiles_slide_but_never_merge() {
        let mut board = board(2, &[(0, 0, MAX_VALUE), (1, 0, MAX_VALUE)]);
        let outcome = board.attempt_move(Direction::Left);
        assert!(!outcome.changed);

        let hint = board.shift(Direction::Down).expect("both tiles slide down");
        assert_eq!(board.tile_at(0, 1).map(|t| t.value()), Some(MAX_VALUE));
        assert_eq!(board.tile_at(1, 1).map(|t| t.value()), Some(MAX_VALUE));
        assert_eq!(hint.merged().count(), 0);
        assert_settled(&board);
    }

    #[test]
    fn display_renders_a_grid() {
        let board = board(3, &[(0, 0, 2), (2, 1, 128), (1, 2, 16)]);
        assert_eq!(
            board.to_string(),
            "  2   .   .\n  .   . 128\n  .  16   .\n"
        );
    }
}
