// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate columns for conference matrices in normal form.
//!
//! A candidate column with its zero at row `kz` has `+1` at row 0 and the
//! value `v` from [`conference_numbers`] at row 1. The remaining rows form
//! two blocks (rows `2..q+2` and `q+2..N`) that line up with the `+1` and
//! `-1` rows of root column 1; choosing how many `+1` values go into each
//! block is what makes the candidate orthogonal to both root columns.

use crate::combinatorics::{ncombs, Combinations};
use crate::design::{conference_numbers, create_root};
use crate::error::{ConferenceError, Result};
use crate::matrix::{inner_product, Column, Matrix};

fn set_block(column: &mut [i8], rows: &[usize], plus: &[usize]) {
    for &r in rows {
        column[r] = -1;
    }
    for &p in plus {
        column[rows[p]] = 1;
    }
}

fn check_zero_row(n: usize, kz: usize) -> Result<()> {
    if n < 4 || n % 2 != 0 {
        return Err(ConferenceError::InvalidInput(format!(
            "number of rows must be even and at least 4, got {}",
            n
        )));
    }
    if kz < 2 || kz >= n {
        return Err(ConferenceError::InvalidInput(format!(
            "zero row {} outside 2..{}",
            kz, n
        )));
    }
    Ok(())
}

/// Rows of the two blocks, with the zero row removed from whichever block
/// holds it.
fn block_rows(n: usize, kz: usize) -> (Vec<usize>, Vec<usize>) {
    let q = (n - 2) / 2;
    let first = (2..q + 2).filter(|&r| r != kz).collect();
    let second = (q + 2..n).filter(|&r| r != kz).collect();
    (first, second)
}

/// Number of candidates [`generate_candidates`] produces for `(n, kz)`.
pub fn candidate_count(n: usize, kz: usize) -> Result<u64> {
    check_zero_row(n, kz)?;
    let numbers = conference_numbers(n, kz);
    let (first, second) = block_rows(n, kz);
    Ok(ncombs(first.len(), numbers.q1) * ncombs(second.len(), numbers.q2))
}

/// All candidate columns with their zero at row `kz`.
///
/// Every column is orthogonal to both columns of [`create_root`]; the order
/// is lexicographic in the choice of `+1` rows, first block major.
pub fn generate_candidates(n: usize, kz: usize) -> Result<Vec<Column>> {
    check_zero_row(n, kz)?;
    let numbers = conference_numbers(n, kz);
    let (first_rows, second_rows) = block_rows(n, kz);
    let root = create_root(n);
    let column0 = root.column(0);

    let mut template = vec![0i8; n];
    template[0] = 1;
    template[1] = numbers.v;

    // every choice for the second block has the same sum against column 0
    let second_sum = 2 * numbers.q2 as i32 - second_rows.len() as i32;

    let expected = candidate_count(n, kz)? as usize;
    let mut out = Vec::with_capacity(expected);
    for first in Combinations::new(first_rows.len(), numbers.q1) {
        let mut partial = template.clone();
        set_block(&mut partial, &first_rows, &first);
        if inner_product(column0, &partial) + second_sum != 0 {
            continue;
        }
        for second in Combinations::new(second_rows.len(), numbers.q2) {
            let mut column = partial.clone();
            set_block(&mut column, &second_rows, &second);
            out.push(column);
        }
    }
    tracing::trace!(n, kz, count = out.len(), "generated candidates");
    Ok(out)
}

/// Second columns for a single-column parent under restricted isomorphism.
///
/// The parent must be a root from
/// [`create_restricted_root`](crate::design::create_restricted_root). The new
/// column starts with `(1, 0)`; the rows `2..=ones` (where the parent is
/// `+1`) get `k1` values `+1` and the following rows get `k2` values `+1`,
/// with `k2 - k1` fixed by orthogonality.
pub fn generate_restricted_second_columns(parent: &Matrix) -> Result<Vec<Column>> {
    if parent.columns() != 1 {
        return Err(ConferenceError::InvalidInput(format!(
            "expected a single-column parent, got {} columns",
            parent.columns()
        )));
    }
    let n = parent.rows();
    let ones = parent.count_in_column(0, 1);
    let expected = crate::design::create_restricted_root(n, ones);
    if ones == 0 || *parent != expected {
        return Err(ConferenceError::InvalidInput(
            "parent is not a restricted root column".to_string(),
        ));
    }
    let n1 = ones as isize - 1;
    let n2 = n as isize - n1 - 2;
    let mut out = Vec::new();
    for k1 in 0..=n1 {
        let k2 = k1 + (n2 - n1) / 2;
        if k2 < 0 || k2 > n2 {
            continue;
        }
        let mut column = vec![-1i8; n];
        column[0] = 1;
        column[1] = 0;
        for x in &mut column[2..2 + k1 as usize] {
            *x = 1;
        }
        let start = 2 + n1 as usize;
        for x in &mut column[start..start + k2 as usize] {
            *x = 1;
        }
        out.push(column);
    }
    Ok(out)
}
