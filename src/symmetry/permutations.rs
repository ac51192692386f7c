// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Iterative enumeration of arrangements within symmetry blocks.
//!
//! Given a base column and a list of row blocks, every distinct arrangement
//! of the values inside each block is visited, for all blocks at once (the
//! Cartesian product of the per-block multiset permutations). Blocks are
//! processed left to right; after a block has been arranged the `accept`
//! predicate decides whether the arrangement can lead anywhere, and if not
//! the later blocks are not enumerated for it.
//!
//! The enumeration keeps an explicit level counter instead of recursing, so
//! the depth is bounded only by the number of blocks.

use crate::combinatorics::next_permutation;
use std::ops::Range;

/// Visit every arrangement of `base` obtained by permuting values within each
/// of `blocks`.
///
/// `accept(candidate, level)` is called after block `blocks[level]` has been
/// arranged (earlier blocks keep their current arrangement, later blocks hold
/// arbitrary values); returning false prunes every completion of the current
/// prefix. `visit` receives each fully arranged column whose blocks were all
/// accepted. Rows not covered by any block keep their base value.
///
/// Returns the number of columns visited.
///
/// ```
/// use conference_search::symmetry::for_each_block_permutation;
///
/// let mut seen = Vec::new();
/// let count = for_each_block_permutation(
///     &[1, -1, 0, 1],
///     &[0..2, 2..4],
///     |_, _| true,
///     |c| seen.push(c.to_vec()),
/// );
/// assert_eq!(count, 4);
/// assert_eq!(seen[0], vec![-1, 1, 0, 1]);
/// ```
pub fn for_each_block_permutation<A, V>(
    base: &[i8],
    blocks: &[Range<usize>],
    mut accept: A,
    mut visit: V,
) -> usize
where
    A: FnMut(&[i8], usize) -> bool,
    V: FnMut(&[i8]),
{
    let mut candidate = base.to_vec();
    if blocks.is_empty() {
        visit(&candidate);
        return 1;
    }
    let depth = blocks.len();
    let mut visited = 0;
    let mut level = 0;
    candidate[blocks[0].clone()].sort_unstable();
    loop {
        if accept(&candidate, level) {
            if level + 1 == depth {
                visit(&candidate);
                visited += 1;
            } else {
                level += 1;
                candidate[blocks[level].clone()].sort_unstable();
                continue;
            }
        }
        // Advance the deepest level that still has arrangements left.
        while !next_permutation(&mut candidate[blocks[level].clone()]) {
            if level == 0 {
                return visited;
            }
            level -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::satisfies_row_symmetry;
    use std::collections::HashSet;

    #[test]
    fn test_no_blocks_visits_base() {
        let mut seen = Vec::new();
        let count = for_each_block_permutation(&[1, 0, -1], &[], |_, _| true, |c| seen.push(c.to_vec()));
        assert_eq!(count, 1);
        assert_eq!(seen, vec![vec![1, 0, -1]]);
    }

    #[test]
    fn test_product_of_multiset_permutations() {
        // block 0: {1, 1, -1} has 3 arrangements; block 1: {0, 1} has 2
        let base = [1, 1, -1, 0, 1];
        let mut seen = HashSet::new();
        let count = for_each_block_permutation(
            &base,
            &[0..3, 3..5],
            |_, _| true,
            |c| {
                seen.insert(c.to_vec());
            },
        );
        assert_eq!(count, 6);
        assert_eq!(seen.len(), 6);
        for c in &seen {
            let mut first = c[0..3].to_vec();
            first.sort();
            assert_eq!(first, vec![-1, 1, 1]);
        }
    }

    #[test]
    fn test_prune_keeps_one_representative_per_block() {
        let base = [1, -1, 0, -1, 1, 0];
        let blocks = [0..3, 3..6];
        let check = vec![false, true, true, false, true, true];
        let mut seen = Vec::new();
        for_each_block_permutation(
            &base,
            &blocks,
            |c, level| satisfies_row_symmetry(c, &check, blocks[level].clone()),
            |c| seen.push(c.to_vec()),
        );
        // exactly one arrangement is non-decreasing in 0 < +1 < -1 per block
        assert_eq!(seen, vec![vec![0, 1, -1, 0, 1, -1]]);
    }

    #[test]
    fn test_pruned_prefix_is_not_extended() {
        let base = [1, -1, 1, -1];
        let mut calls_at_second = 0;
        for_each_block_permutation(
            &base,
            &[0..2, 2..4],
            |c, level| {
                if level == 1 {
                    calls_at_second += 1;
                }
                level != 0 || c[0] == 1
            },
            |_| {},
        );
        // only the prefix (1, -1) survives the first block, giving 2 second-level arrangements
        assert_eq!(calls_at_second, 2);
    }
}
