//! Transaction types, list ordering, and write-time rules.

pub mod error;
pub mod sort;
pub mod types;
pub mod validation;

pub use error::TransactionError;
pub use sort::{SortDirection, SortField, TransactionSort};
pub use types::TransactionType;
pub use validation::ensure_matches_category;
