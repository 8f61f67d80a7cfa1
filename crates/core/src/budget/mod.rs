//! Budget progress tracking.
//!
//! Each budget is measured against the window its period resolves to today:
//! spent is the EXPENSE total for the budget's category inside that window.

pub mod calculator;
pub mod error;
pub mod types;
pub mod validation;


pub use calculator::BudgetProgressCalculator;
pub use error::BudgetError;
pub use types::{BudgetProgress, BudgetStatus};
pub use validation::validate_budget;
