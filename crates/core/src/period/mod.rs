//! Budget periods and calendar windows.
//!
//! A [`BudgetPeriod`] is resolved against a reference date into an inclusive
//! [`PeriodWindow`] by [`PeriodResolver`].

pub mod error;
pub mod resolver;
pub mod types;


pub use error::PeriodError;
pub use resolver::PeriodResolver;
pub use types::{BudgetPeriod, PeriodWindow, YearMonth};
