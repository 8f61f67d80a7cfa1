//! Transaction error types.

use thiserror::Error;

use super::types::TransactionType;

/// Transaction rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The transaction's type differs from its category's type.
    #[error("Transaction type {transaction} does not match category type {category}")]
    TypeMismatch {
        /// Type sent for the transaction.
        transaction: TransactionType,
        /// Type of the referenced category.
        category: TransactionType,
    },

    /// Unknown transaction type text.
    #[error("Invalid transaction type: {0}")]
    InvalidType(String),

    /// Sort parameter could not be understood.
    #[error("Invalid sort '{0}', expected field[,asc|desc] with field one of date, amount, description, created_at")]
    InvalidSort(String),
}
