//! Write-time budget rules.

use chrono::NaiveDate;

use super::error::BudgetError;
use crate::transaction::TransactionType;

/// Checks a budget before it is stored.
///
/// # Errors
///
/// Returns `BudgetError::NotExpenseCategory` for income categories and
/// `BudgetError::EndBeforeStart` when `end < start`.
pub fn validate_budget(
    category_type: TransactionType,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<(), BudgetError> {
    if category_type != TransactionType::Expense {
        return Err(BudgetError::NotExpenseCategory);
    }
    if end.is_some_and(|end| end < start) {
        return Err(BudgetError::EndBeforeStart);
    }
    Ok(())
}
