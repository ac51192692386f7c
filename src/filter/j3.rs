// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! J2 table and J3 checks for double conference matrices.
//!
//! The J3 value of three columns is the sum over rows of their elementwise
//! product. For a candidate column `c` and a pair of existing columns `a`,
//! `b` it equals the inner product of `c` with the J2 column `a ∘ b`. The
//! [`J2Table`] stores these products for every pair of parent columns.

use crate::matrix::{inner_product, Column, Matrix};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct J2Table {
    rows: usize,
    columns: Vec<Column>,
    /// `nonzero_after[j][r]`: number of rows `x >= r` with `columns[j][x] != 0`.
    nonzero_after: Vec<Vec<usize>>,
}

impl J2Table {
    pub fn new(parent: &Matrix) -> Self {
        let rows = parent.rows();
        let mut columns = Vec::new();
        for a in 0..parent.columns() {
            for b in a + 1..parent.columns() {
                let product: Column = parent
                    .column(a)
                    .iter()
                    .zip(parent.column(b))
                    .map(|(&x, &y)| x * y)
                    .collect();
                columns.push(product);
            }
        }
        let nonzero_after = columns
            .iter()
            .map(|d| {
                let mut suffix = vec![0; rows + 1];
                for r in (0..rows).rev() {
                    suffix[r] = suffix[r + 1] + usize::from(d[r] != 0);
                }
                suffix
            })
            .collect();
        Self {
            rows,
            columns,
            nonzero_after,
        }
    }

    /// Number of column pairs.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// True if every J3 value involving `candidate` vanishes.
    pub fn all_zero(&self, candidate: &[i8]) -> bool {
        self.columns.iter().all(|d| inner_product(d, candidate) == 0)
    }

    /// Bound check on a column whose rows `0..=row` are assigned.
    ///
    /// Each unassigned row can move a J3 value by at most one, so a partial
    /// sum larger in magnitude than the number of rows still able to
    /// contribute cannot reach zero. With `zeros_left == 0` every such row
    /// contributes exactly `±1`, which also fixes the parity.
    pub fn partial_feasible(&self, candidate: &[i8], row: usize, zeros_left: usize) -> bool {
        debug_assert!(row < self.rows);
        self.columns.iter().zip(&self.nonzero_after).all(|(d, after)| {
            let partial: i32 = d[..=row]
                .iter()
                .zip(&candidate[..=row])
                .map(|(&x, &y)| x as i32 * y as i32)
                .sum();
            let reach = after[row + 1] as i32;
            if partial.abs() > reach {
                return false;
            }
            zeros_left > 0 || (partial + reach) % 2 == 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> Matrix {
        Matrix::from_columns(
            6,
            &[vec![0, 0, 1, 1, -1, -1], vec![1, -1, 0, 0, 1, -1]],
        )
        .unwrap()
    }

    #[test]
    fn test_table_entries() {
        let table = J2Table::new(&parent());
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns()[0], vec![0, 0, 0, 0, -1, 1]);
        assert!(table.all_zero(&[1, 1, 0, 0, 1, 1]));
        assert!(!table.all_zero(&[1, 1, 0, 0, 1, -1]));
    }

    #[test]
    fn test_partial_bound_is_sound() {
        let table = J2Table::new(&parent());
        // After row 4 the partial sum is -1 and only row 5 remains.
        let c = [1, 1, 0, 0, 1, 0];
        assert!(table.partial_feasible(&c, 4, 0));
        // After row 3 nothing has been contributed; two rows remain.
        assert!(table.partial_feasible(&c, 3, 0));
        // parity: partial 0, one row left and no zeros to place
        let d = [1, 1, 0, 0, 0, 0];
        assert!(!table.partial_feasible(&d, 4, 0));
        assert!(table.partial_feasible(&d, 4, 1));
    }
}
