//! Estimation and comparison errors

use thiserror::Error;

use crate::data::StoreError;

/// Errors raised while building or sampling an empirical distribution
#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("Cannot build a distribution from empty or non-positive values")]
    EmptyInput,

    #[error("Finish time at position {position} is zero")]
    Division { position: usize },

    #[error("No cumulative weight reaches draw {draw}")]
    InvariantViolation { draw: f64 },
}

/// Errors raised by a horse comparison
#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}
