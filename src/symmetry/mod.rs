// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Row symmetry of partially built matrices.
//!
//! Rows of a matrix that are identical can be exchanged without changing the
//! matrix, so an extension column only needs to be considered in one
//! arrangement per block of identical rows. This module computes the blocks
//! ([`SymmetryGroup`]) and the derived "check indices" used to reject
//! non-canonical arrangements.
//!
//! ## Module Structure
//!
//! - `mod`: [`SymmetryGroup`], symmetry rank order and the row-symmetry test
//! - `permutations`: iterative enumeration of permutations within blocks

pub mod permutations;

pub use permutations::for_each_block_permutation;

use crate::matrix::Matrix;
use std::ops::Range;

/// Position of a value in the order used by symmetry checks: `0 < +1 < -1`.
///
/// This is the order of the values reinterpreted as unsigned bytes, and the
/// branch-and-bound generator enumerates values in the same order.
#[inline]
pub fn symmetry_rank(value: i8) -> u8 {
    value as u8
}

/// Partition of the rows into blocks of consecutive identical rows.
///
/// Block boundaries are strictly increasing and the blocks cover `0..N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryGroup {
    /// Start row of each block, followed by the row count as sentinel.
    starts: Vec<usize>,
}

impl SymmetryGroup {
    /// Compute the blocks of identical consecutive rows of `matrix`.
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let n = matrix.rows();
        let mut starts = Vec::with_capacity(n + 1);
        for r in 0..n {
            let same_as_previous =
                r > 0 && (0..matrix.columns()).all(|c| matrix.at(r, c) == matrix.at(r - 1, c));
            if !same_as_previous {
                starts.push(r);
            }
        }
        starts.push(n);
        Self { starts }
    }

    /// Every row in a block of its own.
    pub fn trivial(rows: usize) -> Self {
        Self {
            starts: (0..=rows).collect(),
        }
    }

    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.starts.last().copied().unwrap_or(0)
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    /// Row range of block `b`.
    pub fn block(&self, b: usize) -> Range<usize> {
        self.starts[b]..self.starts[b + 1]
    }

    /// Iterate over the row ranges of all blocks.
    pub fn blocks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.starts.windows(2).map(|w| w[0]..w[1])
    }

    /// Block index containing `row`.
    pub fn block_of(&self, row: usize) -> usize {
        self.starts.partition_point(|&s| s <= row) - 1
    }

    /// `check[i]` is true when rows `i - 1` and `i` lie in the same block.
    pub fn check_indices(&self) -> Vec<bool> {
        let mut check = vec![false; self.rows()];
        for block in self.blocks() {
            for i in block.start + 1..block.end {
                check[i] = true;
            }
        }
        check
    }
}

/// Which grouping supplies the check indices used for inline symmetry pruning.
///
/// The filter chain always uses the grouping of the parent matrix. The inline
/// pruning of the double-conference generators can be driven by a different
/// grouping; keeping the choice explicit means the two can be compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckIndexSource {
    /// Same grouping as the filter chain.
    #[default]
    Parent,
    /// A separately computed grouping.
    Separate(SymmetryGroup),
}

impl CheckIndexSource {
    /// Check indices for a parent with symmetry group `parent`.
    pub fn resolve(&self, parent: &SymmetryGroup) -> Vec<bool> {
        match self {
            CheckIndexSource::Parent => parent.check_indices(),
            CheckIndexSource::Separate(group) => group.check_indices(),
        }
    }
}

/// True if `candidate` is non-decreasing (in symmetry rank) across every
/// checked adjacent row pair inside `rows`.
pub fn satisfies_row_symmetry(candidate: &[i8], check: &[bool], rows: Range<usize>) -> bool {
    (rows.start + 1..rows.end)
        .filter(|&i| check[i])
        .all(|i| symmetry_rank(candidate[i - 1]) <= symmetry_rank(candidate[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::create_root;

    #[test]
    fn test_symmetry_rank_order() {
        assert!(symmetry_rank(0) < symmetry_rank(1));
        assert!(symmetry_rank(1) < symmetry_rank(-1));
    }

    #[test]
    fn test_root_blocks() {
        let root = create_root(8);
        let group = SymmetryGroup::from_matrix(&root);
        let blocks: Vec<_> = group.blocks().collect();
        // rows 0 and 1 are unique; rows 2..=4 are (1, 1); rows 5..=7 are (1, -1)
        assert_eq!(blocks, vec![0..1, 1..2, 2..5, 5..8]);
        assert_eq!(group.num_blocks(), 4);
        assert_eq!(group.block_of(3), 2);
        assert_eq!(group.block_of(7), 3);
        assert_eq!(
            group.check_indices(),
            vec![false, false, false, true, true, false, true, true]
        );
    }

    #[test]
    fn test_trivial_group() {
        let group = SymmetryGroup::trivial(4);
        assert_eq!(group.num_blocks(), 4);
        assert!(group.check_indices().iter().all(|&c| !c));
    }

    #[test]
    fn test_satisfies_row_symmetry() {
        let check = vec![false, true, true, false];
        assert!(satisfies_row_symmetry(&[-1, 0, 1, 0], &check, 0..4));
        assert!(!satisfies_row_symmetry(&[1, -1, 1, 0], &check, 0..4));
        // the pair (1, 2) is outside the range 0..2
        assert!(satisfies_row_symmetry(&[1, 1, 0, 0], &check, 0..2));
    }

    #[test]
    fn test_check_index_source() {
        let parent = SymmetryGroup::from_matrix(&create_root(6));
        assert_eq!(CheckIndexSource::Parent.resolve(&parent), parent.check_indices());
        let other = CheckIndexSource::Separate(SymmetryGroup::trivial(6));
        assert_eq!(other.resolve(&parent), vec![false; 6]);
    }
}
