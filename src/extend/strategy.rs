// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Extension strategies, one per supported (design type, isomorphism type).
//!
//! The strategy is chosen once per run by [`select_strategy`]; the driver
//! then calls it for every parent matrix.

use crate::candidates::{generate_restricted_second_columns, CandidateSet};
use crate::design::{ConferenceType, DesignParameters, IsomorphismType};
use crate::error::{ConferenceError, Result};
use crate::filter::{CandidateFilterChain, FilterConfig};
use crate::matrix::{Column, Matrix};
use crate::search::{BranchAndBound, BranchConfig, BranchStack};
use crate::stats::{Counter, Statistics};
use std::ops::Range;

/// Read-only state shared by all workers during one extension round.
#[derive(Debug)]
pub struct ExtensionContext<'a> {
    pub params: &'a DesignParameters,
    pub candidates: &'a CandidateSet,
    pub branch: &'a BranchConfig,
}

/// Generates the accepted extension columns of one parent.
pub trait ExtensionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Zero rows whose precomputed candidates this strategy reads for
    /// `parent`; empty when it generates its own.
    fn zero_rows(&self, parent: &Matrix, params: &DesignParameters) -> Range<usize>;

    /// Accepted extension columns of `parent`.
    fn extend(
        &self,
        parent: &Matrix,
        ctx: &ExtensionContext<'_>,
        stack: &mut BranchStack,
        stats: &mut Statistics,
    ) -> Vec<Column>;
}

/// First zero row admissible after the zeros already present in `parent`.
fn first_zero_row(parent: &Matrix) -> usize {
    parent.last_zero().map_or(2, |z| z + 1).max(2)
}

/// Filter the precomputed candidates of every zero row in `zero_rows`.
fn filter_precomputed(
    parent: &Matrix,
    zero_rows: Range<usize>,
    ctx: &ExtensionContext<'_>,
    stats: &mut Statistics,
) -> Vec<Column> {
    let chain = CandidateFilterChain::new(parent, &FilterConfig::for_design(ctx.params));
    let mut accepted = Vec::new();
    for kz in zero_rows {
        let candidates = ctx.candidates.for_zero_row(kz);
        stats.add(Counter::Generated, candidates.len() as u64);
        accepted.extend(chain.filter(candidates, stats));
    }
    accepted
}

/// Normal conference matrices, full isomorphism.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalStrategy;

impl ExtensionStrategy for NormalStrategy {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn zero_rows(&self, parent: &Matrix, params: &DesignParameters) -> Range<usize> {
        first_zero_row(parent)..params.max_zero_row(parent) + 1
    }

    fn extend(
        &self,
        parent: &Matrix,
        ctx: &ExtensionContext<'_>,
        _stack: &mut BranchStack,
        stats: &mut Statistics,
    ) -> Vec<Column> {
        filter_precomputed(parent, self.zero_rows(parent, ctx.params), ctx, stats)
    }
}

/// Conference matrices with zeros on the diagonal.
///
/// The zero of the column appended to a `k`-column parent is at row `k`,
/// and the diagonal symmetry filter ties it to row `k` of the parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagonalStrategy;

impl ExtensionStrategy for DiagonalStrategy {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn zero_rows(&self, parent: &Matrix, params: &DesignParameters) -> Range<usize> {
        let end = (params.max_zero_row(parent) + 1).min(params.rows());
        first_zero_row(parent)..end
    }

    fn extend(
        &self,
        parent: &Matrix,
        ctx: &ExtensionContext<'_>,
        _stack: &mut BranchStack,
        stats: &mut Statistics,
    ) -> Vec<Column> {
        filter_precomputed(parent, self.zero_rows(parent, ctx.params), ctx, stats)
    }
}

/// Normal conference matrices under restricted isomorphism.
///
/// A single-column root gets its second column from a dedicated generator;
/// after that the normal candidates are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedStrategy;

impl ExtensionStrategy for RestrictedStrategy {
    fn name(&self) -> &'static str {
        "restricted"
    }

    fn zero_rows(&self, parent: &Matrix, params: &DesignParameters) -> Range<usize> {
        if parent.columns() == 1 {
            return 0..0;
        }
        NormalStrategy.zero_rows(parent, params)
    }

    fn extend(
        &self,
        parent: &Matrix,
        ctx: &ExtensionContext<'_>,
        stack: &mut BranchStack,
        stats: &mut Statistics,
    ) -> Vec<Column> {
        if parent.columns() != 1 {
            return NormalStrategy.extend(parent, ctx, stack, stats);
        }
        match generate_restricted_second_columns(parent) {
            Ok(columns) => {
                stats.add(Counter::Generated, columns.len() as u64);
                let chain = CandidateFilterChain::new(parent, &FilterConfig::for_design(ctx.params));
                chain.filter(&columns, stats)
            }
            Err(error) => {
                tracing::warn!(%error, "single-column parent is not a restricted root");
                Vec::new()
            }
        }
    }
}

/// Double conference matrices, generated by branch and bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleStrategy;

impl ExtensionStrategy for DoubleStrategy {
    fn name(&self) -> &'static str {
        "double"
    }

    fn zero_rows(&self, _parent: &Matrix, _params: &DesignParameters) -> Range<usize> {
        0..0
    }

    fn extend(
        &self,
        parent: &Matrix,
        ctx: &ExtensionContext<'_>,
        stack: &mut BranchStack,
        stats: &mut Statistics,
    ) -> Vec<Column> {
        let params = ctx.params;
        let chain = CandidateFilterChain::new(parent, &FilterConfig::for_design(params));
        BranchAndBound::new(parent, &chain, params.j1zero(), params.j3zero(), ctx.branch)
            .generate(stack, stats)
    }
}

/// The strategy for a design, or `Unimplemented` for unsupported combinations.
pub fn select_strategy(params: &DesignParameters) -> Result<Box<dyn ExtensionStrategy>> {
    match (params.ctype(), params.itype()) {
        (ConferenceType::Normal, IsomorphismType::Full) => Ok(Box::new(NormalStrategy)),
        (ConferenceType::Normal, IsomorphismType::Restricted) => Ok(Box::new(RestrictedStrategy)),
        (ConferenceType::Diagonal, IsomorphismType::Full) => Ok(Box::new(DiagonalStrategy)),
        (ConferenceType::Double, _) => Ok(Box::new(DoubleStrategy)),
        (ctype, itype) => Err(ConferenceError::Unimplemented {
            ctype: ctype.to_string(),
            itype: itype.to_string(),
        }),
    }
}
