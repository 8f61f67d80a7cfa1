//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::aggregation::AggregationError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Month text is not `yyyy-MM`.
    #[error("Invalid month '{0}', expected yyyy-MM")]
    InvalidMonth(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Reading transactions failed.
    #[error(transparent)]
    Store(#[from] AggregationError),
}
