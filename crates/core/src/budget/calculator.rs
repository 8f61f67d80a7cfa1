//! Budget progress calculation.

use std::sync::Arc;

use chrono::NaiveDate;
use fintrack_shared::types::UserId;
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{BudgetProgress, BudgetStatus};
use crate::aggregation::{AggregationStore, BudgetRecord};
use crate::percent::{display_percent, ratio_percent};
use crate::period::PeriodResolver;
use crate::transaction::TransactionType;

/// Percentage at which a budget turns WARNING.
pub const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Percentage at which a budget turns EXCEEDED.
pub const EXCEEDED_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Measures budgets against the spending recorded in their current window.
#[derive(Clone)]
pub struct BudgetProgressCalculator {
    store: Arc<dyn AggregationStore>,
}

impl std::fmt::Debug for BudgetProgressCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetProgressCalculator").finish_non_exhaustive()
    }
}

impl BudgetProgressCalculator {
    /// Creates a calculator reading through `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AggregationStore>) -> Self {
        Self { store }
    }

    /// Progress for every budget the user owns.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Store` if the store fails.
    pub async fn progress_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<Vec<BudgetProgress>, BudgetError> {
        let budgets = self.store.list_budgets(user_id).await?;
        let mut progress = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            progress.push(self.progress_for_budget(user_id, budget, today).await?);
        }
        Ok(progress)
    }

    /// Progress for one budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Store` if the store fails.
    pub async fn progress_for_budget(
        &self,
        user_id: UserId,
        budget: &BudgetRecord,
        today: NaiveDate,
    ) -> Result<BudgetProgress, BudgetError> {
        let window = PeriodResolver::resolve(budget.period, today);
        let spent = self
            .store
            .sum_amount(
                user_id,
                TransactionType::Expense,
                Some(budget.category_id),
                window.start,
                window.end,
            )
            .await?;

        let (percentage_used, status) = Self::measure(spent, budget.amount);

        Ok(BudgetProgress {
            budget_id: budget.id,
            category_id: budget.category_id,
            category_name: budget.category_name.clone(),
            category_color: budget.category_color.clone(),
            budget_amount: budget.amount,
            spent_amount: spent,
            remaining_amount: budget.amount - spent,
            percentage_used,
            status,
            period: budget.period,
            start_date: budget.start_date,
            end_date: budget.end_date,
            period_start: window.start,
            period_end: window.end,
        })
    }

    /// Returns the displayed percentage and status for `spent` of `amount`.
    ///
    /// The status is taken from the percentage before display rounding, so
    /// 79.96% reports as 80.0 but stays OK.
    #[must_use]
    pub fn measure(spent: Decimal, amount: Decimal) -> (Decimal, BudgetStatus) {
        let percentage = if spent > Decimal::ZERO && !amount.is_zero() {
            ratio_percent(spent, amount)
        } else {
            Decimal::ZERO
        };
        (display_percent(percentage), Self::status_for(percentage))
    }

    /// Classifies a percentage against the thresholds.
    #[must_use]
    pub fn status_for(percentage: Decimal) -> BudgetStatus {
        if percentage >= EXCEEDED_THRESHOLD {
            BudgetStatus::Exceeded
        } else if percentage >= WARNING_THRESHOLD {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }
}
