//! Transaction repository for transaction database operations.

use chrono::NaiveDate;
use fintrack_core::transaction::{
    SortDirection, SortField, TransactionError as RuleError, TransactionSort,
    ensure_matches_category,
};
use fintrack_shared::types::PageRequest;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::category::CategoryRepository;
use crate::entities::{categories, sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found for this user.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Category not found for this user.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Transaction violates a domain rule.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filters for listing transactions. All are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only this type.
    pub transaction_type: Option<TransactionType>,
    /// Only this category.
    pub category_id: Option<Uuid>,
    /// On or after this date.
    pub start_date: Option<NaiveDate>,
    /// On or before this date.
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
}

/// Input for creating or replacing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Description.
    pub description: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Income or expense; must match the category.
    pub transaction_type: TransactionType,
    /// Category ID.
    pub category_id: Uuid,
    /// Date the money moved.
    pub date: NaiveDate,
    /// Free text.
    pub notes: Option<String>,
    /// Recurs monthly.
    pub recurring: bool,
}

/// Transaction joined with its category.
#[derive(Debug, Clone)]
pub struct TransactionWithCategory {
    /// Transaction record.
    pub transaction: transactions::Model,
    /// Category record.
    pub category: categories::Model,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists one page of a user's transactions.
    ///
    /// Returns the page and the total number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
        sort: TransactionSort,
    ) -> Result<(Vec<TransactionWithCategory>, u64), TransactionError> {
        let query = Self::filtered(user_id, filter);
        let total = query.clone().count(&self.db).await?;

        let order = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let column = match sort.field {
            SortField::Date => transactions::Column::TransactionDate,
            SortField::Amount => transactions::Column::Amount,
            SortField::Description => transactions::Column::Description,
            SortField::CreatedAt => transactions::Column::CreatedAt,
        };

        let rows = query
            .order_by(column, order)
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        Ok((Self::join(rows), total))
    }

    /// Finds one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the user has no such transaction.
    pub async fn find(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<TransactionWithCategory, TransactionError> {
        let row = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?;

        match row {
            Some((transaction, Some(category))) => Ok(TransactionWithCategory {
                transaction,
                category,
            }),
            _ => Err(TransactionError::NotFound(id)),
        }
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::CategoryNotFound` or a type mismatch.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: TransactionInput,
    ) -> Result<TransactionWithCategory, TransactionError> {
        let category = self.checked_category(user_id, &input).await?;

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            category_id: Set(category.id),
            description: Set(input.description),
            amount: Set(input.amount),
            transaction_type: Set(input.transaction_type),
            transaction_date: Set(input.date),
            notes: Set(input.notes),
            is_recurring: Set(input.recurring),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "Transaction created"
        );
        Ok(TransactionWithCategory {
            transaction,
            category,
        })
    }

    /// Replaces a transaction's fields.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound`, `TransactionError::CategoryNotFound`,
    /// or a type mismatch.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: TransactionInput,
    ) -> Result<TransactionWithCategory, TransactionError> {
        let existing = self.find(user_id, id).await?;
        let category = self.checked_category(user_id, &input).await?;

        let mut transaction: transactions::ActiveModel = existing.transaction.into();
        transaction.category_id = Set(category.id);
        transaction.description = Set(input.description);
        transaction.amount = Set(input.amount);
        transaction.transaction_type = Set(input.transaction_type);
        transaction.transaction_date = Set(input.date);
        transaction.notes = Set(input.notes);
        transaction.is_recurring = Set(input.recurring);
        transaction.updated_at = Set(chrono::Utc::now().into());

        let transaction = transaction.update(&self.db).await?;
        tracing::info!(user_id = %user_id, transaction_id = %id, "Transaction updated");
        Ok(TransactionWithCategory {
            transaction,
            category,
        })
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the user has no such transaction.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        tracing::info!(user_id = %user_id, transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    async fn checked_category(
        &self,
        user_id: Uuid,
        input: &TransactionInput,
    ) -> Result<categories::Model, TransactionError> {
        let category = CategoryRepository::find_owned(&self.db, user_id, input.category_id)
            .await?
            .ok_or(TransactionError::CategoryNotFound(input.category_id))?;
        ensure_matches_category(
            input.transaction_type.into(),
            category.transaction_type.into(),
        )?;
        Ok(category)
    }

    fn filtered(user_id: Uuid, filter: &TransactionFilter) -> Select<transactions::Entity> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = filter.transaction_type {
            query = query.filter(transactions::Column::TransactionType.eq(kind));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::TransactionDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::TransactionDate.lte(end));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    transactions::Entity,
                    transactions::Column::Description,
                ))))
                .like(like_pattern(search)),
            );
        }
        query
    }

    fn join(
        rows: Vec<(transactions::Model, Option<categories::Model>)>,
    ) -> Vec<TransactionWithCategory> {
        rows.into_iter()
            .filter_map(|(transaction, category)| {
                category.map(|category| TransactionWithCategory {
                    transaction,
                    category,
                })
            })
            .collect()
    }
}

/// Builds a lowercase `%term%` pattern with LIKE wildcards escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_lowercases() {
        assert_eq!(like_pattern("Mercado"), "%mercado%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
