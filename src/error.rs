// src/error.rs

use thiserror::Error;

/// Failure conditions of the waste estimator.
///
/// Only structurally invalid direct calls surface here. The other failure
/// classes of the pipeline are absorbed by documented fallbacks and never
/// become errors: missing reference data degrades to default tables, a
/// malformed curve degrades to the linear approximation, and a singular
/// chain degrades to "assume it will not sell".
#[derive(Debug, Error, PartialEq)]
pub enum EstimatorError {
    /// Freshness must already be on the [0, 1] scale when it reaches the
    /// discount curve. Rescaling happens at the data boundary, not here.
    #[error("freshness score {0} is outside the [0, 1] range")]
    InvalidFreshness(f64),

    /// The decay model needs at least one time bucket.
    #[error("bucket count must be at least 1, got {0}")]
    InvalidBucketCount(usize),

    /// A single-lot estimate was requested for an id the caller's lot
    /// accessor does not know.
    #[error("unknown inventory lot {0}")]
    UnknownLot(u64),
}
