//! Write-time transaction rules.

use super::error::TransactionError;
use super::types::TransactionType;

/// Checks that a transaction is filed under a category of the same type.
///
/// # Errors
///
/// Returns `TransactionError::TypeMismatch` when the types differ.
pub fn ensure_matches_category(
    transaction: TransactionType,
    category: TransactionType,
) -> Result<(), TransactionError> {
    if transaction == category {
        Ok(())
    } else {
        Err(TransactionError::TypeMismatch {
            transaction,
            category,
        })
    }
}
