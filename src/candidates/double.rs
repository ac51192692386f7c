// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive candidate columns for double conference matrices.
//!
//! Columns of a double conference matrix carry two zeros. This generator
//! visits every arrangement of two zeros, `p` values `+1` and `N - 2 - p`
//! values `-1`, one composition at a time. It is the reference against which
//! the branch-and-bound generator in [`crate::search`] is checked.

use crate::combinatorics::next_permutation;
use std::ops::Range;

/// Admissible numbers of `+1` entries in a double conference column.
///
/// The column without any `-1` is never generated. With `j1zero` the column
/// sum must vanish, so only the balanced count `(N - 2) / 2` remains.
pub fn plus_counts(n: usize, j1zero: bool) -> Range<usize> {
    if j1zero {
        let half = (n - 2) / 2;
        half..half + 1
    } else {
        0..n - 2
    }
}

/// Visit every double conference column of length `n` whose first entry is
/// not `-1`. Returns the number of columns visited.
pub fn for_each_double_candidate<F>(n: usize, j1zero: bool, mut visit: F) -> usize
where
    F: FnMut(&[i8]),
{
    let mut visited = 0;
    for plus in plus_counts(n, j1zero) {
        let mut column = vec![-1i8; n];
        column[0] = 0;
        column[1] = 0;
        for x in &mut column[2..2 + plus] {
            *x = 1;
        }
        column.sort_unstable();
        loop {
            if column[0] >= 0 {
                visit(&column);
                visited += 1;
            }
            if !next_permutation(&mut column) {
                break;
            }
        }
    }
    visited
}
