// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical forms of arrays under row, column and level permutations.
//!
//! Restricted isomorphism treats a conference matrix, shifted to the levels
//! `{0, 1, 2}`, as an orthogonal array. Two arrays are isomorphic when one
//! is obtained from the other by permuting rows, permuting columns and
//! relabeling the levels within each column.

use crate::error::{ConferenceError, Result};
use crate::graph::{check_labeling, to_array_graph, CanonicalLabelOracle, NautyOracle};
use crate::matrix::transformation::invert_permutation;
use crate::matrix::Matrix;

/// Row, column and per-column level permutation of an array.
///
/// Row `r` moves to `rperm[r]`, column `c` to `cperm[c]`, and level `l` of
/// input column `c` becomes `lperms[c][l]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTransformation {
    pub rperm: Vec<usize>,
    pub cperm: Vec<usize>,
    pub lperms: Vec<Vec<usize>>,
}

impl ArrayTransformation {
    pub fn identity(rows: usize, columns: usize, levels: usize) -> Self {
        Self {
            rperm: (0..rows).collect(),
            cperm: (0..columns).collect(),
            lperms: vec![(0..levels).collect(); columns],
        }
    }

    /// Apply to an array with entries in `0..levels`.
    pub fn apply(&self, array: &Matrix) -> Matrix {
        let mut out = Matrix::zeros(array.rows(), array.columns());
        for c in 0..array.columns() {
            for r in 0..array.rows() {
                let level = self.lperms[c][array.at(r, c) as usize];
                out.set(self.rperm[r], self.cperm[c], level as i8);
            }
        }
        out
    }
}

/// Reduces arrays to a canonical representative.
pub trait OrthogonalArrayCanonicalizer: Send + Sync {
    /// The transformation taking `array` (entries in `0..levels`) to the
    /// canonical representative of its isomorphism class.
    fn reduce(&self, array: &Matrix, levels: usize) -> Result<ArrayTransformation>;
}

/// Array canonicalizer built on a graph canonical labeling oracle.
#[derive(Debug, Clone, Default)]
pub struct GraphArrayCanonicalizer<O = NautyOracle> {
    oracle: O,
}

impl<O: CanonicalLabelOracle> GraphArrayCanonicalizer<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

/// Rank of each item by its label.
fn ranks(labels: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by_key(|&i| labels[i]);
    invert_permutation(&order)
}

impl<O: CanonicalLabelOracle> OrthogonalArrayCanonicalizer for GraphArrayCanonicalizer<O> {
    fn reduce(&self, array: &Matrix, levels: usize) -> Result<ArrayTransformation> {
        let (graph, colors) = to_array_graph(array, levels)?;
        let labeling = self.oracle.canonical_labeling(&graph, &colors);
        check_labeling(&labeling, &colors)?;
        let rows = array.rows();
        let columns = array.columns();
        let level_base = rows + columns;
        let lperms = (0..columns)
            .map(|c| {
                let start = level_base + c * levels;
                ranks(&labeling[start..start + levels])
            })
            .collect();
        let transformation = ArrayTransformation {
            rperm: ranks(&labeling[..rows]),
            cperm: ranks(&labeling[rows..level_base]),
            lperms,
        };
        if transformation.lperms.iter().any(|p| p.len() != levels) {
            return Err(ConferenceError::OracleContractViolation(
                "level permutation has the wrong length".to_string(),
            ));
        }
        Ok(transformation)
    }
}
