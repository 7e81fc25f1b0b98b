use super::tile::Tile;

/// Collapse a single row or column toward its front, merging equal neighbours pairwise.
///
/// `line` must already be ordered nearest-to-target-edge first. Each tile merges at most once per
/// call, so `[4, 4, 8]` collapses to `[8, 8]` and not to `[16]`. Tiles at `MAX_VALUE` never
/// merge. When two tiles merge, the incoming (farther) tile survives: it keeps its id, doubles its
/// value and records the absorbed tile's id in `fused_with`. The absorbed tile is dropped from the
/// output, so lineage is one-way; the link from absorbed to survivor is only visible in
/// `Hint::Absorbed`, computed from the before and after tile sets.
pub(crate) fn reduce(line: Vec<Tile>) -> Vec<Tile> {
    let mut out: Vec<Tile> = Vec::with_capacity(line.len());
    // starts set so the very first tile can never be considered for a merge
    let mut merged = true;
    for tile in line {
        match out.pop() {
            Some(prev) if !merged && tile.can_absorb(&prev) => {
                log::trace!("merging {} into {}", prev, tile);
                out.push(tile.absorb(&prev));
                merged = true;
            }
            Some(prev) => {
                out.push(prev);
                out.push(tile);
                merged = false;
            }
            None => {
                out.push(tile);
                merged = false;
            }
        }
    }
    out
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;
    use crate::engine::tile::{IdAllocator, Value, MAX_VALUE};

    const TOP: Value = MAX_VALUE;
    const HALF: Value = MAX_VALUE / 2;

    /// Lay `values` out along row 0, in traversal order.
    fn line(values: &[Value]) -> Vec<Tile> {
        let mut ids = IdAllocator::new();
        values
            .iter()
            .enumerate()
            .map(|(x, v)| Tile::new(x, 0, *v, ids.next_id()))
            .collect()
    }

    fn values(tiles: &[Tile]) -> Vec<Value> {
        tiles.iter().map(|t| t.value()).collect()
    }

    #[rstest]
    #[case::empty(&[], &[])]
    #[case::single(&[2], &[2])]
    #[case::pair(&[2, 2], &[4])]
    #[case::no_chain_merge(&[2, 2, 2], &[4, 2])]
    #[case::two_pairs(&[2, 2, 2, 2], &[4, 4])]
    #[case::merged_tile_ignores_next(&[4, 4, 8], &[8, 8])]
    #[case::distinct(&[2, 4, 8, 16], &[2, 4, 8, 16])]
    #[case::pair_after_distinct(&[4, 2, 2], &[4, 4])]
    #[case::split_pairs(&[2, 4, 4, 2], &[2, 8, 2])]
    #[case::largest_never_merge(&[TOP, TOP], &[TOP, TOP])]
    #[case::merge_up_to_largest(&[HALF, HALF, TOP], &[TOP, TOP])]
    fn reduce_values(#[case] input: &[Value], #[case] expected: &[Value]) {
        assert_eq!(values(&reduce(line(input))), expected);
    }

    #[test]
    fn incoming_tile_survives_merge() {
        let input = line(&[2, 2]);
        let (absorbed, incoming) = (input[0].id(), input[1].id());
        let out = reduce(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), incoming);
        assert_eq!(out[0].fused_with(), Some(absorbed));
    }

    #[test]
    fn unmerged_tiles_keep_lineage_clear() {
        let out = reduce(line(&[2, 4]));
        assert!(out.iter().all(|t| t.fused_with().is_none()));
    }

    #[rstest]
    #[case(&[2, 2, 2])]
    #[case(&[2, 2, 4, 4])]
    #[case(&[8, 8, 8, 8])]
    #[case(&[2, 4, 8, 8])]
    #[case(&[16, 2, 2, 16])]
    fn reduce_conserves_value_sum(#[case] input: &[Value]) {
        let out = reduce(line(input));
        assert_eq!(
            out.iter().map(|t| t.value()).sum::<Value>(),
            input.iter().sum::<Value>()
        );
    }

    #[rstest]
    #[case(&[2, 2, 2])]
    #[case(&[2, 2, 4, 8])]
    #[case(&[4, 4, 4, 4])]
    #[case(&[4, 4, 8])]
    fn reduce_merges_each_tile_at_most_once(#[case] input: &[Value]) {
        let input = line(input);
        let before: std::collections::HashMap<_, _> =
            input.iter().map(|t| (t.id(), t.value())).collect();
        for tile in reduce(input) {
            assert!(tile.value() <= before[&tile.id()] * 2, "{}", tile);
        }
    }
}
