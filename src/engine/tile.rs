use std::cmp::Ordering;

use crate::error::{Error, Result};

/// The numeric face of a tile. Always a power of two greater than one.
pub(crate) type Value = u32;

/// The largest tile a board holds. Two of these never merge.
pub(crate) const MAX_VALUE: Value = 1 << 31;

/// Position of a cell on the board, `(x, y)` with `(0, 0)` in the top left corner.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub(crate) fn x(&self) -> usize {
        self.0
    }

    pub(crate) fn y(&self) -> usize {
        self.1
    }
}

/// Identity of a tile. Stable across moves and never reused within a session.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct TileId(u64);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing tile ids. Each board owns exactly one.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// A single numbered tile sitting in a cell of the board.
///
/// Equality deliberately ignores identity and lineage: two tiles are equal when they hold the
/// same value in the same cell. Use [`Tile::id`] when identity matters.
#[derive(Clone, Debug)]
pub(crate) struct Tile {
    x: usize,
    y: usize,
    value: Value,
    id: TileId,
    fused_with: Option<TileId>,
    phantom: bool,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.value == other.value
    }
}

impl Eq for Tile {}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}@({1},{2})={3}", self.id, self.x, self.y, self.value)?;
        if let Some(partner) = self.fused_with {
            write!(f, "<{}", partner)?;
        }
        Ok(())
    }
}

impl Tile {
    pub(crate) fn new(x: usize, y: usize, value: Value, id: TileId) -> Self {
        Self {
            x,
            y,
            value,
            id,
            fused_with: None,
            phantom: false,
        }
    }

    /// Construct a ghost tile used only by the presentation layer to show where an absorbed tile
    /// went.
    pub(crate) fn phantom(x: usize, y: usize, value: Value, id: TileId) -> Self {
        Self {
            phantom: true,
            ..Self::new(x, y, value, id)
        }
    }

    pub(crate) fn x(&self) -> usize {
        self.x
    }

    pub(crate) fn y(&self) -> usize {
        self.y
    }

    pub(crate) fn idx(&self) -> Idx {
        Idx(self.x, self.y)
    }

    pub(crate) fn value(&self) -> Value {
        self.value
    }

    pub(crate) fn id(&self) -> TileId {
        self.id
    }

    pub(crate) fn fused_with(&self) -> Option<TileId> {
        self.fused_with
    }

    pub(crate) fn is_phantom(&self) -> bool {
        self.phantom
    }

    /// Copy of this tile with the same id and a clean slate: no merge lineage, not a phantom.
    pub(crate) fn duplicate(&self) -> Self {
        Self::new(self.x, self.y, self.value, self.id)
    }

    pub(crate) fn with_position(&self, x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    /// Whether `other` may merge into this tile: equal values whose sum still fits a tile.
    pub(crate) fn can_absorb(&self, other: &Tile) -> bool {
        self.value == other.value && self.value < MAX_VALUE
    }

    /// Merge `other` into this tile. The result keeps this tile's identity and position, holds
    /// twice the value and records `other` as its merge partner. Only valid when
    /// [`Tile::can_absorb`] holds.
    pub(crate) fn absorb(&self, other: &Tile) -> Self {
        Self {
            value: self.value * 2,
            fused_with: Some(other.id),
            ..self.clone()
        }
    }

    pub(crate) fn cmp_by_id(a: &Tile, b: &Tile) -> Ordering {
        a.id.cmp(&b.id)
    }
}

/// Returns an error unless `value` is `2^k` for some `k >= 1`, no larger than [`MAX_VALUE`].
pub(crate) fn check_value(value: Value) -> Result<Value> {
    if (2..=MAX_VALUE).contains(&value) && value.is_power_of_two() {
        Ok(value)
    } else {
        Err(Error::InvalidTileValue(value))
    }
}
