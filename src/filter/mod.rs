// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate filters.
//!
//! A filter is a total predicate over a candidate column, built against one
//! parent matrix. Filters never fail: rejecting every candidate is a normal
//! outcome that simply ends that branch of the enumeration.
//!
//! The [`CandidateFilterChain`] runs the enabled filters in a fixed order,
//! cheap structural checks before inner products, and records the reason
//! for every rejection in the caller's [`Statistics`].
//!
//! ## Module Structure
//!
//! - `mod`: the [`CandidateFilter`] trait, [`FilterConfig`] and the chain
//! - `predicates`: the individual filters
//! - `j3`: the J2 table shared by the J3 filter and the branch-and-bound bound

pub mod j3;
pub mod predicates;

pub use j3::J2Table;
pub use predicates::{
    DiagonalSymmetryFilter, FirstEntryFilter, J3Filter, OrthogonalityFilter, RowSymmetryFilter,
};

use crate::design::{ConferenceType, DesignParameters};
use crate::matrix::{Column, Matrix};
use crate::stats::{Counter, Statistics};
use crate::symmetry::SymmetryGroup;

/// A predicate over candidate columns for a fixed parent.
pub trait CandidateFilter: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Counter incremented when this filter rejects a candidate.
    fn counter(&self) -> Counter;

    /// True if `candidate` passes this filter.
    fn accept(&self, candidate: &[i8]) -> bool;
}

/// Which filters a chain applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    pub symmetry: bool,
    pub orthogonality: bool,
    pub j3: bool,
    pub first_entry: bool,
    pub diagonal: bool,
}

impl Default for FilterConfig {
    /// Row symmetry and orthogonality only.
    fn default() -> Self {
        Self {
            symmetry: true,
            orthogonality: true,
            j3: false,
            first_entry: false,
            diagonal: false,
        }
    }
}

impl FilterConfig {
    /// The filters a design needs.
    pub fn for_design(params: &DesignParameters) -> Self {
        let double = params.ctype() == ConferenceType::Double;
        Self {
            j3: double && params.j3zero(),
            first_entry: double,
            diagonal: params.ctype() == ConferenceType::Diagonal,
            ..Self::default()
        }
    }
}

/// The enabled filters for one parent matrix, cheapest first.
pub struct CandidateFilterChain {
    group: SymmetryGroup,
    filters: Vec<Box<dyn CandidateFilter>>,
}

impl std::fmt::Debug for CandidateFilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.filters.iter().map(|p| p.name()).collect();
        f.debug_struct("CandidateFilterChain")
            .field("filters", &names)
            .finish()
    }
}

impl CandidateFilterChain {
    pub fn new(parent: &Matrix, config: &FilterConfig) -> Self {
        let group = SymmetryGroup::from_matrix(parent);
        let mut filters: Vec<Box<dyn CandidateFilter>> = Vec::new();
        if config.first_entry {
            filters.push(Box::new(FirstEntryFilter));
        }
        if config.symmetry {
            filters.push(Box::new(RowSymmetryFilter::new(&group)));
        }
        if config.diagonal {
            filters.push(Box::new(DiagonalSymmetryFilter::new(parent)));
        }
        if config.orthogonality {
            filters.push(Box::new(OrthogonalityFilter::new(parent)));
        }
        if config.j3 {
            filters.push(Box::new(J3Filter::new(parent)));
        }
        Self { group, filters }
    }

    /// Row symmetry group of the parent.
    pub fn symmetry_group(&self) -> &SymmetryGroup {
        &self.group
    }

    /// Names of the enabled filters, in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Test one candidate, counting the rejecting filter.
    pub fn accept(&self, candidate: &[i8], stats: &mut Statistics) -> bool {
        for filter in &self.filters {
            if !filter.accept(candidate) {
                stats.increment(filter.counter());
                return false;
            }
        }
        stats.increment(Counter::Accepted);
        true
    }

    /// Test one candidate without recording anything.
    pub fn is_acceptable(&self, candidate: &[i8]) -> bool {
        self.filters.iter().all(|f| f.accept(candidate))
    }

    /// The accepted candidates, in input order.
    pub fn filter(&self, candidates: &[Column], stats: &mut Statistics) -> Vec<Column> {
        let accepted: Vec<Column> = candidates
            .iter()
            .filter(|c| self.accept(c, stats))
            .cloned()
            .collect();
        tracing::trace!(
            before = candidates.len(),
            after = accepted.len(),
            "filtered candidates"
        );
        accepted
    }
}
