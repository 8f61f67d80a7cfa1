//! Budget error types.

use thiserror::Error;

use crate::aggregation::AggregationError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budgets only cap spending.
    #[error("Budgets can only be created for expense categories")]
    NotExpenseCategory,

    /// End date precedes start date.
    #[error("End date must be on or after start date")]
    EndBeforeStart,

    /// Reading transactions failed.
    #[error(transparent)]
    Store(#[from] AggregationError),
}
