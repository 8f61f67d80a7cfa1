//! The read-only store the aggregation engine pulls transactions through.
//!
//! The persistence layer implements [`AggregationStore`]; budget progress
//! and reports only ever see the records defined here.

pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod memory;

pub use error::AggregationError;
pub use store::AggregationStore;
pub use types::{BudgetRecord, CategoryTotal, TransactionRecord};
