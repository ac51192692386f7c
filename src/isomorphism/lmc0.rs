// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The LMC-0 order on conference matrices.
//!
//! Matrices are compared column by column; the first column that differs
//! decides. Within a column:
//!
//! 1. the matrix whose column has a zero at the first row where the zero
//!    patterns differ is smaller
//! 2. otherwise the column whose last zero comes earlier is smaller
//! 3. otherwise entries are compared row by row with the sign reversed: the
//!    larger entry makes its matrix smaller

use crate::error::{ConferenceError, Result};
use crate::matrix::Matrix;
use std::cmp::Ordering;

fn compare_column(left: &[i8], right: &[i8]) -> Ordering {
    for (&l, &r) in left.iter().zip(right) {
        match (l == 0, r == 0) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    let last_zero = |c: &[i8]| c.iter().rposition(|&x| x == 0);
    match last_zero(left).cmp(&last_zero(right)) {
        Ordering::Equal => {}
        decided => return decided,
    }
    for (&l, &r) in left.iter().zip(right) {
        match r.cmp(&l) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// LMC-0 comparison of two matrices of the same shape.
pub(crate) fn lmc0_cmp(left: &Matrix, right: &Matrix) -> Ordering {
    left.iter_columns()
        .zip(right.iter_columns())
        .map(|(l, r)| compare_column(l, r))
        .find(|&o| o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn check_shapes(left: &Matrix, right: &Matrix) -> Result<()> {
    if left.rows() != right.rows() || left.columns() != right.columns() {
        return Err(ConferenceError::InvalidInput(format!(
            "cannot compare a {}x{} matrix with a {}x{} matrix",
            left.rows(),
            left.columns(),
            right.rows(),
            right.columns()
        )));
    }
    Ok(())
}

/// Compare two matrices in the LMC-0 order.
///
/// ```
/// use conference_search::isomorphism::compare_lmc0;
/// use conference_search::matrix::Matrix;
/// use std::cmp::Ordering;
///
/// let a = Matrix::from_columns(3, &[vec![0, 1, 1]]).unwrap();
/// let b = Matrix::from_columns(3, &[vec![1, 0, 1]]).unwrap();
/// assert_eq!(compare_lmc0(&a, &b).unwrap(), Ordering::Less);
/// ```
pub fn compare_lmc0(left: &Matrix, right: &Matrix) -> Result<Ordering> {
    check_shapes(left, right)?;
    Ok(lmc0_cmp(left, right))
}

/// True if `left` is strictly smaller than `right` in the LMC-0 order.
pub fn lmc0_less(left: &Matrix, right: &Matrix) -> Result<bool> {
    Ok(compare_lmc0(left, right)? == Ordering::Less)
}

/// Stable sort of `matrices` in the LMC-0 order.
pub fn sort_lmc0(matrices: &mut [Matrix]) -> Result<()> {
    if let Some(first) = matrices.first() {
        for m in &matrices[1..] {
            check_shapes(first, m)?;
        }
    }
    matrices.sort_by(lmc0_cmp);
    Ok(())
}
