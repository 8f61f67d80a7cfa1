//! Period error types.

use thiserror::Error;

/// Errors raised while interpreting period input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Period kind is not one of WEEKLY, MONTHLY, YEARLY.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Month text is not in `yyyy-MM` form.
    #[error("Invalid month '{0}', expected yyyy-MM")]
    InvalidMonth(String),
}
