//! Budget progress types.

use chrono::NaiveDate;
use fintrack_shared::types::{BudgetId, CategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::BudgetPeriod;

/// Consumption level of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetStatus {
    /// Below 80% used.
    Ok,
    /// At least 80% used.
    Warning,
    /// At least 100% used.
    Exceeded,
}

/// A budget measured against its current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Cap per period.
    pub budget_amount: Decimal,
    /// EXPENSE total inside the current window.
    pub spent_amount: Decimal,
    /// `budget_amount - spent_amount`, negative when over.
    pub remaining_amount: Decimal,
    /// Share of the cap used, 1 decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage_used: Decimal,
    /// Threshold classification.
    pub status: BudgetStatus,
    /// Cadence.
    pub period: BudgetPeriod,
    /// Budget's own start date.
    pub start_date: NaiveDate,
    /// Budget's own end date.
    pub end_date: Option<NaiveDate>,
    /// First day of the window measured.
    pub period_start: NaiveDate,
    /// Last day of the window measured.
    pub period_end: NaiveDate,
}
