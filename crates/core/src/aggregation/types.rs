//! Records exchanged with the store.

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::types::{BudgetId, CategoryId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::BudgetPeriod;
use crate::transaction::TransactionType;

/// A budget joined with its category's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Budget ID.
    pub id: BudgetId,
    /// Category the cap applies to.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Cap per period.
    pub amount: Decimal,
    /// Cadence.
    pub period: BudgetPeriod,
    /// Date the budget starts.
    pub start_date: NaiveDate,
    /// Optional date the budget ends.
    pub end_date: Option<NaiveDate>,
}

/// Grouped sum for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of transactions.
    pub count: u64,
}

/// A transaction joined with its category's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: TransactionId,
    /// Description.
    pub description: String,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Date the money moved.
    pub date: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
