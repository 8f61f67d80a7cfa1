//! Report generation over an aggregation store.

use std::sync::Arc;

use chrono::NaiveDate;
use fintrack_shared::types::UserId;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    AllTimeTotals, CategorySummary, FinancialOverview, MonthComparison, MonthSummary,
    MonthTotals, TransactionSummary,
};
use crate::aggregation::{AggregationStore, CategoryTotal};
use crate::percent::{display_percent, ratio_percent};
use crate::period::YearMonth;
use crate::transaction::TransactionType;

/// Months in an evolution series when the caller does not ask.
pub const DEFAULT_EVOLUTION_MONTHS: u32 = 12;

/// Longest evolution series.
pub const MAX_EVOLUTION_MONTHS: u32 = 24;

/// Categories shown on the overview.
pub const OVERVIEW_TOP_CATEGORIES: usize = 5;

/// Transactions shown on the overview.
pub const OVERVIEW_RECENT_TRANSACTIONS: u64 = 5;

/// Builds report views for one user at a time.
#[derive(Clone)]
pub struct ReportGenerator {
    store: Arc<dyn AggregationStore>,
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator").finish_non_exhaustive()
    }
}

impl ReportGenerator {
    /// Creates a generator reading through `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AggregationStore>) -> Self {
        Self { store }
    }

    /// Income, expense, and balance for `month`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` if the store fails.
    pub async fn month_totals(
        &self,
        user_id: UserId,
        month: YearMonth,
    ) -> Result<MonthTotals, ReportError> {
        let (start, end) = (month.first_day(), month.last_day());
        let income = self
            .store
            .sum_amount(user_id, TransactionType::Income, None, start, end)
            .await?;
        let expense = self
            .store
            .sum_amount(user_id, TransactionType::Expense, None, start, end)
            .await?;
        Ok(MonthTotals::new(month, income, expense))
    }

    /// The month containing `today` compared with the month before.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` if the store fails.
    pub async fn month_summary(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<MonthSummary, ReportError> {
        let current = YearMonth::from_date(today);
        let current_month = self.month_totals(user_id, current).await?;
        let previous_month = self.month_totals(user_id, current.previous()).await?;

        let comparison = MonthComparison {
            income_change: Self::percentage_change(previous_month.income, current_month.income),
            expense_change: Self::percentage_change(previous_month.expense, current_month.expense),
            balance_change: Self::percentage_change(previous_month.balance, current_month.balance),
        };

        Ok(MonthSummary {
            current_month,
            previous_month,
            comparison,
        })
    }

    /// Expense breakdown by category for `month` (`yyyy-MM`), defaulting to
    /// the month containing `today`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` for malformed month text and
    /// `ReportError::Store` if the store fails.
    pub async fn category_summary(
        &self,
        user_id: UserId,
        month: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<CategorySummary>, ReportError> {
        let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
            Some(text) => text
                .parse::<YearMonth>()
                .map_err(|_| ReportError::InvalidMonth(text.to_string()))?,
            None => YearMonth::from_date(today),
        };
        self.category_summary_for(user_id, month).await
    }

    /// Expense breakdown by category for `month`, largest first.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` if the store fails.
    pub async fn category_summary_for(
        &self,
        user_id: UserId,
        month: YearMonth,
    ) -> Result<Vec<CategorySummary>, ReportError> {
        let totals = self
            .store
            .sum_by_category(
                user_id,
                TransactionType::Expense,
                month.first_day(),
                month.last_day(),
            )
            .await?;
        Ok(Self::with_percentages(totals))
    }

    /// Income, expense, and balance for the last `months` months ending with
    /// the month containing `today`, oldest first.
    ///
    /// `months` defaults to 12 and is clamped to 1..=24.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` if the store fails.
    pub async fn monthly_evolution(
        &self,
        user_id: UserId,
        months: Option<i64>,
        today: NaiveDate,
    ) -> Result<Vec<MonthTotals>, ReportError> {
        let count = Self::clamp_months(months);
        let current = YearMonth::from_date(today);

        let mut series = Vec::new();
        for back in (0..count).rev() {
            series.push(self.month_totals(user_id, current.minus_months(back)).await?);
        }
        Ok(series)
    }

    /// Current month, top categories, recent activity, and lifetime totals.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` if the store fails.
    pub async fn overview(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<FinancialOverview, ReportError> {
        let month = YearMonth::from_date(today);
        let current_month = self.month_totals(user_id, month).await?;

        let mut top_categories = self.category_summary_for(user_id, month).await?;
        top_categories.truncate(OVERVIEW_TOP_CATEGORIES);

        let recent_transactions = self
            .store
            .recent_transactions(user_id, OVERVIEW_RECENT_TRANSACTIONS)
            .await?;

        let income = self
            .store
            .sum_all_time(user_id, TransactionType::Income)
            .await?;
        let expense = self
            .store
            .sum_all_time(user_id, TransactionType::Expense)
            .await?;

        Ok(FinancialOverview {
            current_month,
            top_categories,
            recent_transactions,
            all_time: AllTimeTotals {
                income,
                expense,
                balance: income - expense,
            },
        })
    }

    /// Totals for `[start, end]`. When either bound is missing the month
    /// containing `today` is used.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start > end` and
    /// `ReportError::Store` if the store fails.
    pub async fn transaction_summary(
        &self,
        user_id: UserId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<TransactionSummary, ReportError> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                let month = YearMonth::from_date(today);
                (month.first_day(), month.last_day())
            }
        };
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let total_income = self
            .store
            .sum_amount(user_id, TransactionType::Income, None, start, end)
            .await?;
        let total_expense = self
            .store
            .sum_amount(user_id, TransactionType::Expense, None, start, end)
            .await?;
        let transaction_count = self.store.count_transactions(user_id, start, end).await?;

        Ok(TransactionSummary {
            start_date: start,
            end_date: end,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            transaction_count,
        })
    }

    /// Percentage change from `old` to `new`, 1 decimal place.
    ///
    /// When `old` is zero the change is 0 if `new` is also zero, else 100.
    #[must_use]
    pub fn percentage_change(old: Decimal, new: Decimal) -> Decimal {
        if old.is_zero() {
            return if new.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE_HUNDRED
            };
        }
        display_percent(ratio_percent(new - old, old))
    }

    /// Sorts category totals largest first and attaches each one's share of
    /// the overall total.
    #[must_use]
    pub fn with_percentages(mut totals: Vec<CategoryTotal>) -> Vec<CategorySummary> {
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        let grand_total: Decimal = totals.iter().map(|t| t.total).sum();

        totals
            .into_iter()
            .map(|t| {
                let percentage = if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    display_percent(ratio_percent(t.total, grand_total))
                };
                CategorySummary {
                    category_id: t.category_id,
                    category_name: t.category_name,
                    category_color: t.category_color,
                    total: t.total,
                    transaction_count: t.count,
                    percentage,
                }
            })
            .collect()
    }

    /// Clamps a requested series length to 1..=24, defaulting to 12.
    #[must_use]
    pub fn clamp_months(months: Option<i64>) -> u32 {
        months.map_or(DEFAULT_EVOLUTION_MONTHS, |m| {
            u32::try_from(m.clamp(1, i64::from(MAX_EVOLUTION_MONTHS)))
                .unwrap_or(DEFAULT_EVOLUTION_MONTHS)
        })
    }
}
