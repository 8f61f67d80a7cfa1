//! Report data types.

use chrono::NaiveDate;
use fintrack_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::TransactionRecord;
use crate::period::YearMonth;

/// Income, expense, and balance for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    /// Month label, `yyyy-MM`.
    pub month: YearMonth,
    /// Total income.
    pub income: Decimal,
    /// Total expense.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

impl MonthTotals {
    /// Builds totals, deriving the balance.
    #[must_use]
    pub fn new(month: YearMonth, income: Decimal, expense: Decimal) -> Self {
        Self {
            month,
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Percentage change from the previous month, 1 decimal place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthComparison {
    /// Income change.
    #[serde(with = "rust_decimal::serde::float")]
    pub income_change: Decimal,
    /// Expense change.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense_change: Decimal,
    /// Balance change.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_change: Decimal,
}

/// Current month against the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    /// Month containing today.
    pub current_month: MonthTotals,
    /// The month before.
    pub previous_month: MonthTotals,
    /// Change between them.
    pub comparison: MonthComparison,
}

/// Expense total for one category within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
    /// Share of the month's expenses, 1 decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

/// Totals across the user's whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllTimeTotals {
    /// Total income.
    pub income: Decimal,
    /// Total expense.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

/// Dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialOverview {
    /// Month containing today.
    pub current_month: MonthTotals,
    /// Largest expense categories this month.
    pub top_categories: Vec<CategorySummary>,
    /// Latest transactions.
    pub recent_transactions: Vec<TransactionRecord>,
    /// Lifetime totals.
    pub all_time: AllTimeTotals,
}

/// Totals for an arbitrary inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    /// First day in range.
    pub start_date: NaiveDate,
    /// Last day in range.
    pub end_date: NaiveDate,
    /// Total income.
    pub total_income: Decimal,
    /// Total expense.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
}
