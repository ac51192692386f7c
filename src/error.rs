// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for enumeration and isomorphism reduction.
//!
//! Filters never produce errors: an empty candidate list is a legitimate
//! outcome (an exhausted branch). Errors are reserved for malformed input,
//! resource limits, oracle misbehaviour and unsupported design combinations.

use thiserror::Error;

/// Errors surfaced by the enumeration core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConferenceError {
    /// Malformed matrix entries, shape mismatches or invalid design parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A precomputed candidate set would exceed its memory budget.
    #[error("candidate set for zero row {zero_row} needs {bytes} bytes (budget {budget} bytes)")]
    ResourceExhausted {
        zero_row: usize,
        bytes: usize,
        budget: usize,
    },

    /// The canonical-labeling oracle returned a labeling that cannot be decoded.
    #[error("canonical labeling oracle violated its contract: {0}")]
    OracleContractViolation(String),

    /// The (design type, isomorphism type) combination has no extension strategy.
    #[error("{ctype} designs with {itype} isomorphism are not supported")]
    Unimplemented { ctype: String, itype: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConferenceError>;
