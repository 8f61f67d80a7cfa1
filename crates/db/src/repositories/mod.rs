//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query is scoped to the owning user.

pub mod aggregation;
pub mod budget;
pub mod category;
pub mod transaction;
pub mod user;

use sea_orm::{DbErr, SqlErr};

pub use aggregation::AggregationRepository;
pub use budget::{BudgetError, BudgetInput, BudgetRepository, BudgetWithCategory};
pub use category::{CategoryError, CategoryInput, CategoryRepository};
pub use transaction::{
    TransactionError, TransactionFilter, TransactionInput, TransactionRepository,
    TransactionWithCategory,
};
pub use user::{UserError, UserRepository};

/// Returns true when the database rejected a write on a unique constraint.
///
/// The pre-insert lookups can race with a concurrent request; this catches
/// the loser.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
