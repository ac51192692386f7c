// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matrix and column types.
//!
//! A [`Matrix`] is an `N × k` array of small integers stored column-major, so
//! that a column is a contiguous slice. Conference matrices only use the values
//! `-1`, `0` and `+1`, but the type itself does not enforce this: the
//! restricted isomorphism path temporarily shifts entries to `{0, 1, 2}`, and
//! input validation happens where the conference semantics are needed.
//!
//! # Examples
//!
//! ```
//! use conference_search::matrix::Matrix;
//!
//! let m = Matrix::from_columns(3, &[vec![0, 1, 1], vec![1, 0, -1]]).unwrap();
//! assert_eq!(m.at(2, 1), -1);
//! assert_eq!(m.last_zero(), Some(1));
//! ```

pub mod transformation;

pub use transformation::ConferenceTransformation;

use crate::error::{ConferenceError, Result};
use std::fmt;

/// A single column (or candidate extension column) of length N.
pub type Column = Vec<i8>;

/// Inner product of two equally long columns.
#[inline]
pub fn inner_product(a: &[i8], b: &[i8]) -> i32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x as i32 * y as i32).sum()
}

/// Dense column-major matrix with `i8` entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<i8>,
}

impl Matrix {
    /// Create an all-zero matrix.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0; rows * columns],
        }
    }

    /// Build a matrix from a list of columns, each of length `rows`.
    pub fn from_columns(rows: usize, columns: &[Column]) -> Result<Self> {
        let mut data = Vec::with_capacity(rows * columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.len() != rows {
                return Err(ConferenceError::InvalidInput(format!(
                    "column {} has length {}, expected {}",
                    index,
                    column.len(),
                    rows
                )));
            }
            data.extend_from_slice(column);
        }
        Ok(Self {
            rows,
            columns: columns.len(),
            data,
        })
    }

    /// Build a matrix from row slices. All rows must have equal length.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.len());
        let mut matrix = Self::zeros(rows.len(), columns);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ConferenceError::InvalidInput(format!(
                    "row {} has length {}, expected {}",
                    r,
                    row.len(),
                    columns
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                matrix.set(r, c, value);
            }
        }
        Ok(matrix)
    }

    /// Number of rows (N).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (k).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Entry at row `r`, column `c`.
    #[inline]
    pub fn at(&self, r: usize, c: usize) -> i8 {
        self.data[c * self.rows + r]
    }

    /// Set the entry at row `r`, column `c`.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: i8) {
        self.data[c * self.rows + r] = value;
    }

    /// Column `c` as a contiguous slice.
    #[inline]
    pub fn column(&self, c: usize) -> &[i8] {
        &self.data[c * self.rows..(c + 1) * self.rows]
    }

    /// Iterate over all columns.
    pub fn iter_columns(&self) -> impl Iterator<Item = &[i8]> + '_ {
        (0..self.columns).map(move |c| self.column(c))
    }

    /// Row `r` as an owned vector.
    pub fn row(&self, r: usize) -> Vec<i8> {
        (0..self.columns).map(|c| self.at(r, c)).collect()
    }

    /// Return a new matrix with `column` appended.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the number of rows.
    pub fn with_column(&self, column: &[i8]) -> Matrix {
        assert_eq!(
            column.len(),
            self.rows,
            "extension column length must match the row count"
        );
        let mut data = Vec::with_capacity(self.data.len() + self.rows);
        data.extend_from_slice(&self.data);
        data.extend_from_slice(column);
        Matrix {
            rows: self.rows,
            columns: self.columns + 1,
            data,
        }
    }

    /// The matrix formed by the first `k` columns.
    pub fn first_columns(&self, k: usize) -> Matrix {
        let k = k.min(self.columns);
        Matrix {
            rows: self.rows,
            columns: k,
            data: self.data[..k * self.rows].to_vec(),
        }
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min_entry(&self) -> Option<i8> {
        self.data.iter().copied().min()
    }

    /// True if every entry is one of `-1`, `0`, `+1`.
    pub fn is_ternary(&self) -> bool {
        self.data.iter().all(|&x| (-1..=1).contains(&x))
    }

    /// Row index of the last zero in column `c`.
    pub fn last_zero_in_column(&self, c: usize) -> Option<usize> {
        self.column(c).iter().rposition(|&x| x == 0)
    }

    /// Largest row index holding a zero anywhere in the matrix.
    pub fn last_zero(&self) -> Option<usize> {
        (0..self.columns)
            .filter_map(|c| self.last_zero_in_column(c))
            .max()
    }

    /// Number of entries equal to `value` in column `c`.
    pub fn count_in_column(&self, c: usize, value: i8) -> usize {
        self.column(c).iter().filter(|&&x| x == value).count()
    }

    /// Multiply row `r` by -1.
    pub fn negate_row(&mut self, r: usize) {
        for c in 0..self.columns {
            let value = self.at(r, c);
            self.set(r, c, -value);
        }
    }

    /// Multiply column `c` by -1.
    pub fn negate_column(&mut self, c: usize) {
        let rows = self.rows;
        for x in &mut self.data[c * rows..(c + 1) * rows] {
            *x = -*x;
        }
    }

    /// Apply `f` to every entry.
    pub fn map(&self, f: impl Fn(i8) -> i8) -> Matrix {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// The transposed matrix.
    pub fn transposed(&self) -> Matrix {
        let mut t = Matrix::zeros(self.columns, self.rows);
        for c in 0..self.columns {
            for r in 0..self.rows {
                t.set(c, r, self.at(r, c));
            }
        }
        t
    }

    /// True if all columns are pairwise orthogonal.
    pub fn has_orthogonal_columns(&self) -> bool {
        (0..self.columns).all(|a| {
            (a + 1..self.columns).all(|b| inner_product(self.column(a), self.column(b)) == 0)
        })
    }
}

/// True if every row has its negation among the rows of the matrix.
///
/// Foldover conference designs consist of row pairs `(x, -x)`.
pub fn is_conference_foldover(matrix: &Matrix) -> bool {
    let rows: Vec<Vec<i8>> = (0..matrix.rows()).map(|r| matrix.row(r)).collect();
    rows.iter().enumerate().all(|(i, row)| {
        let negated: Vec<i8> = row.iter().map(|&x| -x).collect();
        let found = rows.iter().any(|other| *other == negated);
        if !found {
            tracing::trace!(row = i, "no foldover partner");
        }
        found
    })
}

impl fmt::Display for Matrix {
    /// Format one matrix row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.columns {
                write!(f, "{:3}", self.at(r, c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
