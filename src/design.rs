// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Design parameters and root matrices.
//!
//! A search run is described by [`DesignParameters`]: the number of rows N,
//! the number of columns to reach, the kind of matrix and the notion of
//! isomorphism used for deduplication. Parameters are validated once and are
//! immutable afterwards.
//!
//! # Normal form
//!
//! Conference matrices are searched in a normal form where the first two
//! columns are fixed (see [`create_root`]). Every later column has its single
//! zero at some row `kz`; the remaining `N - 2` free rows split into a middle
//! block (rows `2..q+2`) and a last block (rows `q+2..N`), with `q = (N-2)/2`.
//! Orthogonality with the first two columns then fixes how many `+1` values
//! each block holds, which is what [`conference_numbers`] computes.

use crate::error::{ConferenceError, Result};
use crate::matrix::{Column, Matrix};
use strum_macros::{Display, EnumIter, EnumString};

/// Kind of matrix being enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ConferenceType {
    /// Conference matrices in normal form, zeros anywhere below the last zero.
    Normal,
    /// Conference matrices whose zeros lie on the diagonal.
    Diagonal,
    /// Double conference matrices (two zeros per column, extra J3 invariants).
    Double,
}

/// Group of transformations used for isomorphism reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum IsomorphismType {
    /// Row and column permutations plus row and column sign switches.
    Full,
    /// Orthogonal-array isomorphism of the shifted `{0, 1, 2}` matrix.
    Restricted,
}

/// Block sizes and sign for an extension column with its zero at row `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConferenceNumbers {
    /// Half the number of free rows, `(N - 2) / 2`.
    pub q: usize,
    /// Number of `+1` values in the middle block.
    pub q1: usize,
    /// Number of `+1` values in the last block.
    pub q2: usize,
    /// Value at row 1.
    pub v: i8,
}

impl ConferenceNumbers {
    /// True if the zero of the column lies in the middle block.
    pub fn zero_in_middle(&self, k: usize) -> bool {
        k < self.q + 2
    }
}

/// Block parameters of an extension column with zero at row `k`.
///
/// `n` must be even and at least 4, as [`DesignParameters`] guarantees.
///
/// ```
/// use conference_search::design::conference_numbers;
///
/// let n = conference_numbers(8, 2);
/// assert_eq!((n.q, n.q1, n.q2, n.v), (3, 1, 2, -1));
/// ```
pub fn conference_numbers(n: usize, k: usize) -> ConferenceNumbers {
    debug_assert!(
        n >= 4 && n % 2 == 0,
        "conference numbers need an even N of at least 4, got N={}",
        n
    );
    let q = n.saturating_sub(2) / 2;
    let (q1, q2, v) = if k < q + 2 {
        if q % 2 == 0 {
            let q1 = (q / 2).saturating_sub(1);
            (q1, q1 + 1, 1)
        } else {
            let q1 = (q - 1) / 2;
            (q1, q1 + 1, -1)
        }
    } else if q % 2 == 0 {
        let q1 = q / 2;
        (q1, q1, -1)
    } else {
        let q1 = (q - 1) / 2;
        (q1, q1, 1)
    };
    let numbers = ConferenceNumbers { q, q1, q2, v };
    debug_assert_eq!(
        q1 + q2 + usize::from(v == 1),
        q,
        "inconsistent conference numbers for N={} k={}",
        n,
        k
    );
    numbers
}

/// Parameters of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DesignParameters {
    rows: usize,
    target_columns: usize,
    ctype: ConferenceType,
    itype: IsomorphismType,
    j1zero: bool,
    j3zero: bool,
}

impl DesignParameters {
    /// Parameters for normal conference matrices with full isomorphism.
    pub fn new(rows: usize, target_columns: usize) -> Result<Self> {
        Self::with_options(
            rows,
            target_columns,
            ConferenceType::Normal,
            IsomorphismType::Full,
            false,
            false,
        )
    }

    /// Fully specified parameters.
    ///
    /// N must be even and at least 4, and `target_columns` at most N.
    pub fn with_options(
        rows: usize,
        target_columns: usize,
        ctype: ConferenceType,
        itype: IsomorphismType,
        j1zero: bool,
        j3zero: bool,
    ) -> Result<Self> {
        if rows < 4 || rows % 2 != 0 {
            return Err(ConferenceError::InvalidInput(format!(
                "number of rows must be even and at least 4, got {}",
                rows
            )));
        }
        if target_columns > rows {
            return Err(ConferenceError::InvalidInput(format!(
                "target column count {} exceeds row count {}",
                target_columns, rows
            )));
        }
        Ok(Self {
            rows,
            target_columns,
            ctype,
            itype,
            j1zero,
            j3zero,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn target_columns(&self) -> usize {
        self.target_columns
    }

    pub fn ctype(&self) -> ConferenceType {
        self.ctype
    }

    pub fn itype(&self) -> IsomorphismType {
        self.itype
    }

    /// Require balanced `+1`/`-1` counts in double conference columns.
    pub fn j1zero(&self) -> bool {
        self.j1zero
    }

    /// Require vanishing J3 values (double conference only).
    pub fn j3zero(&self) -> bool {
        self.j3zero
    }

    /// The root matrix a search for this design starts from.
    pub fn root(&self) -> Matrix {
        match self.ctype {
            ConferenceType::Double => create_double_root(self.rows),
            ConferenceType::Normal | ConferenceType::Diagonal => create_root(self.rows),
        }
    }

    /// Largest admissible zero row for the column appended to `parent`.
    pub fn max_zero_row(&self, parent: &Matrix) -> usize {
        match self.ctype {
            ConferenceType::Normal | ConferenceType::Double => self.rows - 1,
            ConferenceType::Diagonal => parent.columns(),
        }
    }
}

fn stack_columns(n: usize, columns: &[Column]) -> Matrix {
    let mut matrix = Matrix::zeros(n, columns.len());
    for (c, column) in columns.iter().enumerate() {
        for (r, &value) in column.iter().enumerate() {
            matrix.set(r, c, value);
        }
    }
    matrix
}

fn normal_first_two(n: usize) -> (Column, Column) {
    let mut c0 = vec![1; n];
    c0[0] = 0;
    let c1 = (0..n)
        .map(|i| match i {
            1 => 0,
            i if i <= n / 2 => 1,
            _ => -1,
        })
        .collect();
    (c0, c1)
}

/// The two-column root in normal form.
///
/// Column 0 is zero at row 0 and `+1` elsewhere; column 1 is zero at row 1,
/// `+1` for the other rows up to `N/2` and `-1` after that.
pub fn create_root(n: usize) -> Matrix {
    let (c0, c1) = normal_first_two(n);
    stack_columns(n, &[c0, c1])
}

/// The three-column root in normal form.
pub fn create_root_three(n: usize) -> Matrix {
    let (c0, c1) = normal_first_two(n);
    let numbers = conference_numbers(n, 2);
    let mut c2 = vec![-1; n];
    c2[0] = 1;
    c2[1] = numbers.v;
    c2[2] = 0;
    for x in &mut c2[3..3 + numbers.q1] {
        *x = 1;
    }
    for x in &mut c2[2 + numbers.q..2 + numbers.q + numbers.q2] {
        *x = 1;
    }
    stack_columns(n, &[c0, c1, c2])
}

/// Single-column root of a double conference design.
///
/// Zeros at rows 0 and 1, `+1` for rows `2..=N/2`, `-1` after.
pub fn create_double_root(n: usize) -> Matrix {
    let column: Column = (0..n)
        .map(|i| match i {
            0 | 1 => 0,
            i if i <= n / 2 => 1,
            _ => -1,
        })
        .collect();
    stack_columns(n, &[column])
}

/// Single-column root for restricted isomorphism.
///
/// Zero at row 0, then `ones` rows of `+1` and `-1` for the rest.
pub fn create_restricted_root(n: usize, ones: usize) -> Matrix {
    let column: Column = (0..n)
        .map(|i| match i {
            0 => 0,
            i if i <= ones => 1,
            _ => -1,
        })
        .collect();
    stack_columns(n, &[column])
}
