// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Branch-and-bound generation of double conference columns.
//!
//! Double conference columns carry two zeros, so the normal-form generator
//! does not apply. Instead the column is built row by row in a depth-first
//! search over an explicit [`BranchStack`]:
//!
//! 1. Pop a frame and assign its value to its row
//! 2. At the inline row, check the partial J3 sums can still reach zero
//! 3. At the last row, run the full [`CandidateFilterChain`]
//! 4. Otherwise push one frame per value still available, skipping values
//!    that would break row symmetry with the previous row
//!
//! The search ends when the stack is empty. Frames are popped LIFO, so the
//! output order follows the stack discipline rather than any sort order.
//!
//! ## Module Structure
//!
//! - `mod`: [`BranchAndBound`] and [`BranchConfig`]
//! - `stack`: [`Frame`] and [`BranchStack`]
//! - `inflate`: block-permutation inflation and the exhaustive reference pipeline

pub mod inflate;
pub mod stack;

pub use inflate::{exhaustive_double_extensions, inflate_candidate};
pub use stack::{value_index, BranchStack, Frame, BRANCH_VALUES};

use crate::candidates::plus_counts;
use crate::filter::{CandidateFilterChain, J2Table};
use crate::matrix::{Column, Matrix};
use crate::stats::{Counter, Statistics};
use crate::symmetry::CheckIndexSource;

/// Row at which the partial J3 bound is applied when none is configured.
pub fn default_inline_row(rows: usize) -> usize {
    (3 * rows / 4).clamp(1, rows.saturating_sub(2).max(1))
}

/// Tuning of the branch-and-bound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchConfig {
    /// Row for the partial J3 check; `None` uses [`default_inline_row`].
    pub inline_row: Option<usize>,
    /// Apply the partial J3 bound (only when J3 filtering is on).
    pub inline_j3: bool,
    /// Skip values that break row symmetry while branching.
    pub inline_symmetry: bool,
    /// Grouping that supplies the inline symmetry check indices.
    pub check_indices: CheckIndexSource,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            inline_row: None,
            inline_j3: true,
            inline_symmetry: true,
            check_indices: CheckIndexSource::Parent,
        }
    }
}

/// Branch-and-bound generator for the columns extending one parent.
#[derive(Debug)]
pub struct BranchAndBound<'a> {
    rows: usize,
    chain: &'a CandidateFilterChain,
    j1zero: bool,
    j2: Option<J2Table>,
    inline_row: usize,
    check: Option<Vec<bool>>,
}

impl<'a> BranchAndBound<'a> {
    /// `j3` enables the inline J3 bound (subject to `config.inline_j3`).
    pub fn new(
        parent: &Matrix,
        chain: &'a CandidateFilterChain,
        j1zero: bool,
        j3: bool,
        config: &BranchConfig,
    ) -> Self {
        let rows = parent.rows();
        let check = config
            .inline_symmetry
            .then(|| config.check_indices.resolve(chain.symmetry_group()));
        Self {
            rows,
            chain,
            j1zero,
            j2: (j3 && config.inline_j3).then(|| J2Table::new(parent)),
            inline_row: config
                .inline_row
                .unwrap_or_else(|| default_inline_row(rows)),
            check,
        }
    }

    fn push_roots(&self, stack: &mut BranchStack) {
        let n = self.rows;
        for plus in plus_counts(n, self.j1zero) {
            let minus = n - 2 - plus;
            // row 0 is never -1: it is +1 or holds one of the zeros
            if plus > 0 {
                stack.push(Frame {
                    row: 0,
                    value: 1,
                    remaining: [2, plus - 1, minus],
                });
            }
            stack.push(Frame {
                row: 0,
                value: 0,
                remaining: [1, plus, minus],
            });
        }
    }

    /// Run the search to completion, returning the accepted columns.
    ///
    /// The stack is cleared first; it is passed in so a worker can reuse the
    /// allocation across parents.
    pub fn generate(&self, stack: &mut BranchStack, stats: &mut Statistics) -> Vec<Column> {
        let n = self.rows;
        let mut column = vec![0i8; n];
        let mut accepted = Vec::new();
        stack.clear();
        self.push_roots(stack);

        while let Some(frame) = stack.pop() {
            stats.increment(Counter::BranchNodes);
            column[frame.row] = frame.value;

            if frame.row == self.inline_row {
                if let Some(j2) = &self.j2 {
                    if !j2.partial_feasible(&column, frame.row, frame.remaining[0]) {
                        stats.increment(Counter::PrunedJ3);
                        continue;
                    }
                }
            }
            if frame.row == n - 1 {
                stats.increment(Counter::Generated);
                if self.chain.accept(&column, stats) {
                    accepted.push(column.clone());
                }
                continue;
            }

            let next = frame.row + 1;
            let start = match &self.check {
                Some(check) if check[next] => value_index(frame.value),
                _ => 0,
            };
            if start > 0 {
                stats.increment(Counter::PrunedSymmetry);
            }
            for index in start..BRANCH_VALUES.len() {
                if let Some(child) = frame.child(index) {
                    stack.push(child);
                }
            }
        }
        tracing::debug!(
            rows = n,
            accepted = accepted.len(),
            "branch-and-bound finished"
        );
        accepted
    }
}
