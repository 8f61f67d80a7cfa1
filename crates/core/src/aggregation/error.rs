//! Aggregation store error types.

use thiserror::Error;

/// Failure reported by an [`AggregationStore`](super::AggregationStore).
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The backing store failed.
    #[error("aggregation store failure: {0}")]
    Backend(String),
}
