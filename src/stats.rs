// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Each worker owns a [`Statistics`] value and increments counters as it
//! generates, filters and prunes candidates. Per-worker statistics are merged
//! by the extension driver when the workers finish.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counter {
    /// Candidate columns produced by a generator.
    Generated,
    /// Rejected by the row-symmetry filter.
    RejectedSymmetry,
    /// Rejected because the first entry was negative.
    RejectedFirstEntry,
    /// Rejected by the diagonal symmetry filter.
    RejectedDiagonal,
    /// Rejected by the orthogonality filter.
    RejectedOrthogonality,
    /// Rejected by the J3 filter.
    RejectedJ3,
    /// Candidates that passed every filter.
    Accepted,
    /// Branch-and-bound nodes expanded.
    BranchNodes,
    /// Branches cut by inline symmetry pruning.
    PrunedSymmetry,
    /// Branches cut by the inline J3 bound.
    PrunedJ3,
    /// Parent matrices processed by the extension driver.
    Parents,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counter::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    #[inline]
    pub fn increment(&mut self, counter: Counter) {
        self.stats[counter as usize] += 1;
    }

    /// Increment the specified counter by `amount`.
    pub fn add(&mut self, counter: Counter, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.stats[counter as usize]
    }

    /// Add all counters of `other` into `self`.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    /// Non-zero counters as `name=value` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counter::iter().filter(|&c| self.get(c) > 0) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", counter, self.get(counter))?;
            first = false;
        }
        Ok(())
    }
}
