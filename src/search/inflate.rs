// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate inflation and the exhaustive double conference pipeline.

use crate::candidates::for_each_double_candidate;
use crate::filter::CandidateFilterChain;
use crate::matrix::{Column, Matrix};
use crate::stats::{Counter, Statistics};
use crate::symmetry::{for_each_block_permutation, satisfies_row_symmetry, SymmetryGroup};
use std::ops::Range;

/// All columns obtained from `base` by rearranging values inside the
/// non-trivial blocks of `group`, pruned block by block with the row
/// symmetry test on `check` and finally filtered by `chain`.
///
/// `check` need not come from `group`; see
/// [`CheckIndexSource`](crate::symmetry::CheckIndexSource).
pub fn inflate_candidate(
    base: &[i8],
    group: &SymmetryGroup,
    check: &[bool],
    chain: &CandidateFilterChain,
    stats: &mut Statistics,
) -> Vec<Column> {
    let blocks: Vec<Range<usize>> = group.blocks().filter(|b| b.len() > 1).collect();
    let mut accepted = Vec::new();
    for_each_block_permutation(
        base,
        &blocks,
        |candidate, level| satisfies_row_symmetry(candidate, check, blocks[level].clone()),
        |candidate| {
            stats.increment(Counter::Generated);
            if chain.accept(candidate, stats) {
                accepted.push(candidate.to_vec());
            }
        },
    );
    accepted
}

/// Generate every double conference column and keep those `chain` accepts.
///
/// This is the brute-force reference for the branch-and-bound search.
pub fn exhaustive_double_extensions(
    parent: &Matrix,
    chain: &CandidateFilterChain,
    j1zero: bool,
    stats: &mut Statistics,
) -> Vec<Column> {
    let mut accepted = Vec::new();
    for_each_double_candidate(parent.rows(), j1zero, |candidate| {
        stats.increment(Counter::Generated);
        if chain.accept(candidate, stats) {
            accepted.push(candidate.to_vec());
        }
    });
    accepted
}
