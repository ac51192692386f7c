// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Extension of matrices by one column.
//!
//! The [`ExtensionDriver`] takes a list of `k`-column parents and returns
//! every accepted `k + 1`-column child, in parent order. It does not
//! deduplicate; that is a separate call to the
//! [`IsomorphismClassSelector`]. [`ExtensionDriver::run`] alternates the two
//! steps until the target column count is reached.
//!
//! Parents are independent, so they are processed on a `rayon` pool. The
//! precomputed [`CandidateSet`] is shared read-only; each worker owns its
//! branch-and-bound stack and its statistics.
//!
//! ## Module Structure
//!
//! - `mod`: [`ExtensionDriver`] and [`ExtendOptions`]
//! - `strategy`: the per-design [`ExtensionStrategy`] implementations

pub mod strategy;

pub use strategy::{
    select_strategy, DiagonalStrategy, DoubleStrategy, ExtensionContext, ExtensionStrategy,
    NormalStrategy, RestrictedStrategy,
};

use crate::candidates::{CandidateSet, DEFAULT_MEMORY_BUDGET};
use crate::design::DesignParameters;
use crate::error::{ConferenceError, Result};
use crate::isomorphism::IsomorphismClassSelector;
use crate::matrix::Matrix;
use crate::search::{BranchConfig, BranchStack};
use crate::stats::{Counter, Statistics};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of parents between progress messages.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Options of an extension run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendOptions {
    /// Log progress every this many parents (0 disables progress messages).
    pub progress_interval: usize,
    /// Worker threads; `None` uses the global `rayon` pool.
    pub threads: Option<usize>,
    /// Memory budget for the candidate set, in bytes.
    pub memory_budget: usize,
    /// Branch-and-bound tuning for double conference designs.
    pub branch: BranchConfig,
}

impl Default for ExtendOptions {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            threads: None,
            memory_budget: DEFAULT_MEMORY_BUDGET,
            branch: BranchConfig::default(),
        }
    }
}

/// The classes found at one column count during [`ExtensionDriver::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub columns: usize,
    /// Number of children produced before deduplication.
    pub extensions: usize,
    pub representatives: Vec<Matrix>,
}

/// Extends matrices column by column for one design.
pub struct ExtensionDriver {
    params: DesignParameters,
    options: ExtendOptions,
    strategy: Box<dyn ExtensionStrategy>,
    selector: IsomorphismClassSelector,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for ExtensionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionDriver")
            .field("params", &self.params)
            .field("options", &self.options)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl ExtensionDriver {
    /// Driver for `params`; fails with `Unimplemented` for unsupported designs.
    pub fn new(params: DesignParameters, options: ExtendOptions) -> Result<Self> {
        let strategy = select_strategy(&params)?;
        let pool = options.threads.and_then(|threads| {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(pool),
                Err(error) => {
                    tracing::warn!(%error, threads, "using the global thread pool");
                    None
                }
            }
        });
        Ok(Self {
            params,
            options,
            strategy,
            selector: IsomorphismClassSelector::default(),
            pool,
        })
    }

    /// Use `selector` for the deduplication steps of [`run`](Self::run).
    pub fn with_selector(mut self, selector: IsomorphismClassSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn params(&self) -> &DesignParameters {
        &self.params
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    fn validate(&self, matrices: &[Matrix]) -> Result<()> {
        for (i, m) in matrices.iter().enumerate() {
            if m.rows() != self.params.rows() {
                return Err(ConferenceError::InvalidInput(format!(
                    "matrix {} has {} rows, design has {}",
                    i,
                    m.rows(),
                    self.params.rows()
                )));
            }
            if m.columns() >= self.params.rows() || !m.is_ternary() {
                return Err(ConferenceError::InvalidInput(format!(
                    "matrix {} cannot be extended",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Precompute the candidates every parent will read.
    fn candidate_set(&self, matrices: &[Matrix]) -> Result<CandidateSet> {
        let ranges = matrices
            .iter()
            .map(|m| self.strategy.zero_rows(m, &self.params))
            .filter(|r| !r.is_empty());
        let (start, end) = ranges.fold((usize::MAX, 0), |(s, e), r| (s.min(r.start), e.max(r.end)));
        CandidateSet::generate(self.params.rows(), start..end, self.options.memory_budget)
    }

    /// All children of `matrices`, with the statistics of the round.
    pub fn extend_with_statistics(&self, matrices: &[Matrix]) -> Result<(Vec<Matrix>, Statistics)> {
        self.validate(matrices)?;
        let candidates = self.candidate_set(matrices)?;
        let ctx = ExtensionContext {
            params: &self.params,
            candidates: &candidates,
            branch: &self.options.branch,
        };
        let total = matrices.len();
        let interval = self.options.progress_interval;
        let done = AtomicUsize::new(0);
        let rows = self.params.rows();

        let work = || -> Vec<(Vec<Matrix>, Statistics)> {
            matrices
                .par_iter()
                .map_init(
                    || BranchStack::with_rows(rows),
                    |stack, parent| {
                        let mut stats = Statistics::new();
                        stats.increment(Counter::Parents);
                        let children: Vec<Matrix> = self
                            .strategy
                            .extend(parent, &ctx, stack, &mut stats)
                            .iter()
                            .map(|column| parent.with_column(column))
                            .collect();
                        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                        if interval > 0 && (finished % interval == 0 || finished == total) {
                            tracing::info!(
                                parents = finished,
                                total,
                                children = children.len(),
                                "extension progress"
                            );
                        }
                        (children, stats)
                    },
                )
                .collect()
        };
        let results = match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        };

        let mut statistics = Statistics::new();
        let mut children = Vec::new();
        for (list, stats) in results {
            children.extend(list);
            statistics.merge(&stats);
        }
        tracing::debug!(%statistics, "extension round finished");
        Ok((children, statistics))
    }

    /// All children of `matrices`, concatenated in parent order.
    pub fn extend(&self, matrices: &[Matrix]) -> Result<Vec<Matrix>> {
        Ok(self.extend_with_statistics(matrices)?.0)
    }

    /// Starting from `start` (or the design root when `None`), extend and
    /// deduplicate until the target column count is reached or no children
    /// remain.
    pub fn run(&self, start: Option<Vec<Matrix>>) -> Result<Vec<Level>> {
        let mut current = start.unwrap_or_else(|| vec![self.params.root()]);
        let mut levels = Vec::new();
        while current
            .first()
            .map_or(false, |m| m.columns() < self.params.target_columns())
        {
            let children = self.extend(&current)?;
            let extensions = children.len();
            let (representatives, _) = self.selector.select_classes(&children, self.params.itype())?;
            let columns = current[0].columns() + 1;
            tracing::info!(
                columns,
                extensions,
                classes = representatives.len(),
                "level complete"
            );
            levels.push(Level {
                columns,
                extensions,
                representatives: representatives.clone(),
            });
            current = representatives;
        }
        Ok(levels)
    }
}

/// Extend `matrices` by one column under `params`.
pub fn extend(
    matrices: &[Matrix],
    params: &DesignParameters,
    options: &ExtendOptions,
) -> Result<Vec<Matrix>> {
    ExtensionDriver::new(*params, options.clone())?.extend(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{create_root, ConferenceType, IsomorphismType};

    #[test]
    fn test_extend_root_n6() {
        let params = DesignParameters::new(6, 3).unwrap();
        let children = extend(&[create_root(6)], &params, &ExtendOptions::default()).unwrap();
        assert!(!children.is_empty());
        for child in &children {
            assert_eq!(child.columns(), 3);
            assert!(child.has_orthogonal_columns());
            assert_eq!(child.first_columns(2), create_root(6));
        }
    }

    #[test]
    fn test_children_follow_parent_order() {
        let params = DesignParameters::new(8, 4).unwrap();
        let driver = ExtensionDriver::new(params, ExtendOptions::default()).unwrap();
        let level3 = driver.extend(&[params.root()]).unwrap();
        assert!(!level3.is_empty());
        let parents: Vec<Matrix> = level3.iter().rev().cloned().collect();
        let (children, stats) = driver.extend_with_statistics(&parents).unwrap();
        assert_eq!(stats.get(Counter::Parents), parents.len() as u64);
        let mut p = 0;
        for child in &children {
            while child.first_columns(3) != parents[p] {
                p += 1;
                assert!(p < parents.len(), "children out of parent order");
            }
        }
    }

    #[test]
    fn test_unsupported_design() {
        let params = DesignParameters::with_options(
            8,
            4,
            ConferenceType::Diagonal,
            IsomorphismType::Restricted,
            false,
            false,
        )
        .unwrap();
        assert!(matches!(
            ExtensionDriver::new(params, ExtendOptions::default()),
            Err(ConferenceError::Unimplemented { .. })
        ));
    }

    #[test]
    fn test_memory_guard_surfaces() {
        let params = DesignParameters::new(12, 4).unwrap();
        let options = ExtendOptions {
            memory_budget: 100,
            ..ExtendOptions::default()
        };
        let result = extend(&[params.root()], &params, &options);
        assert!(matches!(result, Err(ConferenceError::ResourceExhausted { .. })));
    }

    #[test]
    fn test_run_reaches_target() {
        let params = DesignParameters::new(6, 4).unwrap();
        let options = ExtendOptions {
            threads: Some(2),
            ..ExtendOptions::default()
        };
        let levels = ExtensionDriver::new(params, options).unwrap().run(None).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].columns, 3);
        assert_eq!(levels[0].representatives.len(), 1);
        for m in &levels[1].representatives {
            assert_eq!(m.columns(), 4);
            assert!(m.has_orthogonal_columns());
        }
    }

    #[test]
    fn test_rejects_wrong_row_count() {
        let params = DesignParameters::new(8, 4).unwrap();
        assert!(matches!(
            extend(&[create_root(6)], &params, &ExtendOptions::default()),
            Err(ConferenceError::InvalidInput(_))
        ));
    }
}
