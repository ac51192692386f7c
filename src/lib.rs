// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Column-by-column enumeration of conference matrices.
//!
//! A conference matrix of order N is an N x N matrix with entries in
//! `{-1, 0, +1}`, one zero per column, and mutually orthogonal columns.
//! Double conference matrices have two zeros per column. This crate grows
//! partial designs from a fixed root one column at a time and reduces every
//! generation to one representative per isomorphism class.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: Candidates (Immutable)
//!
//! Precomputed once per extension round and shared by all workers:
//! - Normal-form candidate columns, one list per zero row
//! - The root matrices of each design type
//!
//! ## Tier 2: Per-parent state (Mutable)
//!
//! Owned by the worker extending one parent:
//! - The filter chain built from the parent (symmetry blocks, J2 tables)
//! - The branch-and-bound stack for double conference designs
//! - Statistics, merged when the round completes
//!
//! # Search Algorithm
//!
//! Each round has two phases:
//!
//! 1. **Extension**: every parent gets every accepted extension column, from
//!    filtered precomputed candidates or from branch and bound
//! 2. **Selection**: children are reduced to canonical form through a graph
//!    canonical labeling, sorted in the LMC-0 order, and deduplicated
//!
//! Parents are independent, so the extension phase runs on a `rayon` pool.
//!
//! # Example
//!
//! ```
//! use conference_search::{DesignParameters, ExtendOptions, ExtensionDriver};
//!
//! let params = DesignParameters::new(6, 3).unwrap();
//! let driver = ExtensionDriver::new(params, ExtendOptions::default()).unwrap();
//! let levels = driver.run(None).unwrap();
//! assert_eq!(levels.last().unwrap().representatives.len(), 1);
//! ```

pub mod candidates;
pub mod combinatorics;
pub mod design;
pub mod error;
pub mod extend;
pub mod filter;
pub mod graph;
pub mod isomorphism;
pub mod matrix;
pub mod search;
pub mod stats;
pub mod symmetry;

// Re-export commonly used types
pub use design::{ConferenceType, DesignParameters, IsomorphismType};
pub use error::{ConferenceError, Result};
pub use extend::{extend, ExtendOptions, ExtensionDriver, Level};
pub use isomorphism::{select_classes, IsomorphismClassSelector};
pub use matrix::{Column, Matrix};
pub use stats::{Counter, Statistics};
