use std::collections::HashMap;

use super::tile::{Idx, Tile, TileId, Value};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Hint {
    /// The tile slid to a new cell.
    ToIdx(Idx),
    /// The tile survived a merge, now holds the new value, and sits at the given cell.
    NewValueToIdx(Value, Idx),
    /// The tile was absorbed by the given survivor and slid into its cell before vanishing.
    Absorbed(TileId, Idx),
    /// The tile was spawned after the move.
    NewTile(Value),
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToIdx(idx) => write!(f, "Hint::ToIdx({0})", idx),
            Self::NewValueToIdx(value, idx) => {
                write!(f, "Hint::NewValueToIdx({0}, {1})", value, idx)
            }
            Self::Absorbed(into, idx) => write!(f, "Hint::Absorbed({0}, {1})", into, idx),
            Self::NewTile(value) => write!(f, "Hint::NewTile({0})", value),
        }
    }
}

/// What happened to each tile during one move, keyed by tile id and ordered by id.
///
/// The presentation layer uses this to animate tiles by identity: a tile absorbed in a merge no
/// longer exists on the board but still shows up here with its last known position.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct AnimationHint {
    hint: Vec<(TileId, Idx, Hint)>,
}

impl std::fmt::Display for AnimationHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.hint.is_empty() {
            writeln!(f)?;
        }
        for (id, from, hint) in &self.hint {
            writeln!(f, "  {0} {1} - {2}", id, from, hint)?;
        }
        Ok(())
    }
}

impl AnimationHint {
    /// Describe the transition from `before` to `after`. Tiles that stayed put are left out.
    pub(crate) fn between(before: &[Tile], after: &[Tile]) -> Self {
        let previous: HashMap<TileId, &Tile> = before.iter().map(|t| (t.id(), t)).collect();
        let mut hint = Vec::new();
        for tile in after {
            let to = tile.idx();
            let Some(prev) = previous.get(&tile.id()) else {
                hint.push((tile.id(), to, Hint::NewTile(tile.value())));
                continue;
            };
            if let Some(partner) = tile.fused_with().and_then(|id| previous.get(&id)) {
                hint.push((tile.id(), prev.idx(), Hint::NewValueToIdx(tile.value(), to)));
                hint.push((partner.id(), partner.idx(), Hint::Absorbed(tile.id(), to)));
            } else if prev.idx() != to {
                hint.push((tile.id(), prev.idx(), Hint::ToIdx(to)));
            }
        }
        hint.sort_by_key(|(id, _, _)| *id);
        Self { hint }
    }

    pub(crate) fn hints(&self) -> &[(TileId, Idx, Hint)] {
        &self.hint
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.hint.is_empty()
    }

    /// Cells that received a freshly spawned tile.
    pub(crate) fn spawned(&self) -> impl Iterator<Item = Idx> + '_ {
        self.hint.iter().filter_map(|(_, idx, h)| match h {
            Hint::NewTile(_) => Some(*idx),
            _ => None,
        })
    }

    /// Cells holding the survivor of a merge.
    pub(crate) fn merged(&self) -> impl Iterator<Item = Idx> + '_ {
        self.hint.iter().filter_map(|(_, _, h)| match h {
            Hint::NewValueToIdx(_, to) => Some(*to),
            _ => None,
        })
    }

    /// Ghost tiles for every absorbed tile, left on the cell it was absorbed from.
    pub(crate) fn phantoms(&self, before: &[Tile]) -> Vec<Tile> {
        let previous: HashMap<TileId, &Tile> = before.iter().map(|t| (t.id(), t)).collect();
        self.hint
            .iter()
            .filter_map(|(id, from, h)| match h {
                Hint::Absorbed(..) => previous
                    .get(id)
                    .map(|t| Tile::phantom(from.x(), from.y(), t.value(), *id)),
                _ => None,
            })
            .collect()
    }
}
