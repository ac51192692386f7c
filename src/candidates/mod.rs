// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate column generation.
//!
//! Immutable, precomputed data: the raw candidate columns for a fixed row
//! count, one list per zero row. A [`CandidateSet`] is built once per
//! extension round and then shared read-only by every worker; each worker
//! filters the lists against its own parent matrix.
//!
//! ## Module Structure
//!
//! - `normal`: columns with one zero, in normal form
//! - `double`: exhaustive columns with two zeros

pub mod double;
pub mod normal;

pub use double::{for_each_double_candidate, plus_counts};
pub use normal::{
    candidate_count, generate_candidates, generate_restricted_second_columns,
};

use crate::error::{ConferenceError, Result};
use crate::matrix::Column;

/// Default memory budget for candidate sets, in bytes.
pub const DEFAULT_MEMORY_BUDGET: usize = 1 << 30;

/// Raw candidate columns for a fixed N, indexed by zero row.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    rows: usize,
    by_zero_row: Vec<Vec<Column>>,
}

impl CandidateSet {
    /// Generate the candidates for every row in `zero_rows`.
    ///
    /// The list for a single zero row may use at most `budget / N` bytes;
    /// the size is computed up front so an oversized list is never built.
    pub fn generate(
        rows: usize,
        zero_rows: impl IntoIterator<Item = usize>,
        budget: usize,
    ) -> Result<Self> {
        let mut by_zero_row = vec![Vec::new(); rows];
        for kz in zero_rows {
            let count = candidate_count(rows, kz)?;
            let bytes = (count as usize).saturating_mul(rows);
            let limit = budget / rows;
            if bytes > limit {
                return Err(ConferenceError::ResourceExhausted {
                    zero_row: kz,
                    bytes,
                    budget: limit,
                });
            }
            by_zero_row[kz] = generate_candidates(rows, kz)?;
            tracing::debug!(rows, kz, count, "candidate list ready");
        }
        Ok(Self { rows, by_zero_row })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Candidates with the zero at row `kz`; empty if that row was not generated.
    pub fn for_zero_row(&self, kz: usize) -> &[Column] {
        self.by_zero_row.get(kz).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of stored candidates.
    pub fn len(&self) -> usize {
        self.by_zero_row.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate memory held by the candidate columns.
    pub fn bytes(&self) -> usize {
        self.len() * self.rows
    }
}
