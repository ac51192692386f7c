// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The individual candidate filters.
//!
//! Each filter is built once from the parent matrix, precomputing whatever it
//! needs, and then answers accept/reject for any number of candidates.

use super::j3::J2Table;
use super::CandidateFilter;
use crate::matrix::{inner_product, Column, Matrix};
use crate::stats::Counter;
use crate::symmetry::{satisfies_row_symmetry, SymmetryGroup};

/// Keep one arrangement per reordering of identical parent rows.
#[derive(Debug, Clone)]
pub struct RowSymmetryFilter {
    check: Vec<bool>,
}

impl RowSymmetryFilter {
    pub fn new(group: &SymmetryGroup) -> Self {
        Self {
            check: group.check_indices(),
        }
    }
}

impl CandidateFilter for RowSymmetryFilter {
    fn name(&self) -> &str {
        "RowSymmetry"
    }

    fn counter(&self) -> Counter {
        Counter::RejectedSymmetry
    }

    fn accept(&self, candidate: &[i8]) -> bool {
        satisfies_row_symmetry(candidate, &self.check, 0..candidate.len())
    }
}

/// Inner product zero with every parent column.
#[derive(Debug, Clone)]
pub struct OrthogonalityFilter {
    columns: Vec<Column>,
}

impl OrthogonalityFilter {
    pub fn new(parent: &Matrix) -> Self {
        Self {
            columns: parent.iter_columns().map(<[i8]>::to_vec).collect(),
        }
    }
}

impl CandidateFilter for OrthogonalityFilter {
    fn name(&self) -> &str {
        "Orthogonality"
    }

    fn counter(&self) -> Counter {
        Counter::RejectedOrthogonality
    }

    fn accept(&self, candidate: &[i8]) -> bool {
        self.columns.iter().all(|c| inner_product(c, candidate) == 0)
    }
}

/// Vanishing J3 values with every pair of parent columns.
#[derive(Debug, Clone)]
pub struct J3Filter {
    table: J2Table,
}

impl J3Filter {
    pub fn new(parent: &Matrix) -> Self {
        Self {
            table: J2Table::new(parent),
        }
    }
}

impl CandidateFilter for J3Filter {
    fn name(&self) -> &str {
        "J3"
    }

    fn counter(&self) -> Counter {
        Counter::RejectedJ3
    }

    fn accept(&self, candidate: &[i8]) -> bool {
        self.table.all_zero(candidate)
    }
}

/// First entry must not be `-1`; fixes the sign of double conference columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEntryFilter;

impl CandidateFilter for FirstEntryFilter {
    fn name(&self) -> &str {
        "FirstEntry"
    }

    fn counter(&self) -> Counter {
        Counter::RejectedFirstEntry
    }

    fn accept(&self, candidate: &[i8]) -> bool {
        candidate.first().map_or(true, |&x| x >= 0)
    }
}

/// Diagonal designs: the new column must mirror row `k` of the parent.
///
/// For a parent with `k` columns the core of the final matrix is symmetric
/// when `N ≡ 2 (mod 4)` and antisymmetric otherwise, so entry `x` of the new
/// column equals `m · parent[k][x]` for `2 <= x < k`, with `m = ±1`.
#[derive(Debug, Clone)]
pub struct DiagonalSymmetryFilter {
    expected: Vec<(usize, i8)>,
}

impl DiagonalSymmetryFilter {
    pub fn new(parent: &Matrix) -> Self {
        let n = parent.rows();
        let k = parent.columns();
        let m: i8 = if n % 4 == 2 { 1 } else { -1 };
        let expected = if k < n {
            (2..k).map(|x| (x, m * parent.at(k, x))).collect()
        } else {
            Vec::new()
        };
        Self { expected }
    }
}

impl CandidateFilter for DiagonalSymmetryFilter {
    fn name(&self) -> &str {
        "DiagonalSymmetry"
    }

    fn counter(&self) -> Counter {
        Counter::RejectedDiagonal
    }

    fn accept(&self, candidate: &[i8]) -> bool {
        self.expected.iter().all(|&(x, value)| candidate[x] == value)
    }
}
