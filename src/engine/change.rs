use super::tile::Tile;

/// Returns true if `after` differs from `before` in tile count, or in the position or value of
/// any tile once both sides are lined up by id.
///
/// A transform regroups tiles line by line, so both sets are normalised by id before comparing;
/// comparing them in collection order would report spurious changes.
pub(crate) fn has_changed(before: &[Tile], after: &[Tile]) -> bool {
    if before.len() != after.len() {
        return true;
    }
    let mut before: Vec<&Tile> = before.iter().collect();
    let mut after: Vec<&Tile> = after.iter().collect();
    before.sort_by(|a, b| Tile::cmp_by_id(a, b));
    after.sort_by(|a, b| Tile::cmp_by_id(a, b));
    before.iter().zip(after.iter()).any(|(b, a)| b != a)
}
