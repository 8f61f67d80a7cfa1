//! Store trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use fintrack_shared::types::{CategoryId, UserId};
use rust_decimal::Decimal;

use super::error::AggregationError;
use super::types::{BudgetRecord, CategoryTotal, TransactionRecord};
use crate::transaction::TransactionType;

/// Read-only queries over one user's transactions and budgets.
///
/// Every query is scoped to `user_id`. Date bounds are inclusive.
#[async_trait]
pub trait AggregationStore: Send + Sync {
    /// Sums matching transaction amounts, `0` when nothing matches.
    async fn sum_amount(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        category_id: Option<CategoryId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AggregationError>;

    /// Counts transactions of either type in the range.
    async fn count_transactions(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, AggregationError>;

    /// Lists the user's budgets with their category display data.
    async fn list_budgets(&self, user_id: UserId) -> Result<Vec<BudgetRecord>, AggregationError>;

    /// Sums and counts transactions of one type per category.
    async fn sum_by_category(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>, AggregationError>;

    /// Sums every transaction of one type the user ever recorded.
    async fn sum_all_time(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
    ) -> Result<Decimal, AggregationError>;

    /// Most recent transactions, newest date first, then newest created first.
    async fn recent_transactions(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<TransactionRecord>, AggregationError>;
}
