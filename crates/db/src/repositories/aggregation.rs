//! Read-side queries backing budget progress and reports.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use fintrack_core::aggregation::{
    AggregationError, AggregationStore, BudgetRecord, CategoryTotal, TransactionRecord,
};
use fintrack_core::transaction::TransactionType as DomainTransactionType;
use fintrack_shared::types::{BudgetId, CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use crate::entities::{budgets, categories, sea_orm_active_enums::TransactionType, transactions};

#[derive(Debug, FromQueryResult)]
struct CategoryTotalRow {
    category_id: Uuid,
    category_name: String,
    category_color: String,
    total: Option<Decimal>,
    count: i64,
}

/// `AggregationStore` over Postgres.
#[derive(Debug, Clone)]
pub struct AggregationRepository {
    db: DatabaseConnection,
}

impl AggregationRepository {
    /// Creates a new aggregation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn of_type(user_id: UserId, kind: DomainTransactionType) -> Select<transactions::Entity> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .filter(transactions::Column::TransactionType.eq(TransactionType::from(kind)))
    }

    async fn sum(&self, query: Select<transactions::Entity>) -> Result<Decimal, DbErr> {
        let total: Option<Option<Decimal>> = query
            .select_only()
            .column_as(
                Expr::col((transactions::Entity, transactions::Column::Amount)).sum(),
                "total",
            )
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }
}

fn backend(err: DbErr) -> AggregationError {
    tracing::error!(error = %err, "Aggregation query failed");
    AggregationError::Backend(err.to_string())
}

#[async_trait]
impl AggregationStore for AggregationRepository {
    async fn sum_amount(
        &self,
        user_id: UserId,
        transaction_type: DomainTransactionType,
        category_id: Option<CategoryId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AggregationError> {
        let mut query = Self::of_type(user_id, transaction_type)
            .filter(transactions::Column::TransactionDate.between(start, end));
        if let Some(category_id) = category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id.into_inner()));
        }
        self.sum(query).await.map_err(backend)
    }

    async fn count_transactions(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, AggregationError> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .filter(transactions::Column::TransactionDate.between(start, end))
            .count(&self.db)
            .await
            .map_err(backend)
    }

    async fn list_budgets(&self, user_id: UserId) -> Result<Vec<BudgetRecord>, AggregationError> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(budgets::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .map_err(backend)?;

        Ok(rows
            .into_iter()
            .filter_map(|(budget, category)| {
                category.map(|category| BudgetRecord {
                    id: BudgetId::from_uuid(budget.id),
                    category_id: CategoryId::from_uuid(category.id),
                    category_name: category.name,
                    category_color: category.color,
                    amount: budget.amount,
                    period: budget.period.into(),
                    start_date: budget.start_date,
                    end_date: budget.end_date,
                })
            })
            .collect())
    }

    async fn sum_by_category(
        &self,
        user_id: UserId,
        transaction_type: DomainTransactionType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>, AggregationError> {
        let rows = Self::of_type(user_id, transaction_type)
            .filter(transactions::Column::TransactionDate.between(start, end))
            .select_only()
            .column(transactions::Column::CategoryId)
            .column_as(categories::Column::Name, "category_name")
            .column_as(categories::Column::Color, "category_color")
            .column_as(
                Expr::col((transactions::Entity, transactions::Column::Amount)).sum(),
                "total",
            )
            .column_as(
                Expr::col((transactions::Entity, transactions::Column::Id)).count(),
                "count",
            )
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .group_by(transactions::Column::CategoryId)
            .group_by(categories::Column::Name)
            .group_by(categories::Column::Color)
            .into_model::<CategoryTotalRow>()
            .all(&self.db)
            .await
            .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryTotal {
                category_id: CategoryId::from_uuid(row.category_id),
                category_name: row.category_name,
                category_color: row.category_color,
                total: row.total.unwrap_or(Decimal::ZERO),
                count: u64::try_from(row.count).unwrap_or(0),
            })
            .collect())
    }

    async fn sum_all_time(
        &self,
        user_id: UserId,
        transaction_type: DomainTransactionType,
    ) -> Result<Decimal, AggregationError> {
        self.sum(Self::of_type(user_id, transaction_type))
            .await
            .map_err(backend)
    }

    async fn recent_transactions(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<TransactionRecord>, AggregationError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(limit)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .map_err(backend)?;

        Ok(rows
            .into_iter()
            .filter_map(|(transaction, category)| {
                category.map(|category| TransactionRecord {
                    id: TransactionId::from_uuid(transaction.id),
                    description: transaction.description,
                    amount: transaction.amount,
                    transaction_type: transaction.transaction_type.into(),
                    category_id: CategoryId::from_uuid(category.id),
                    category_name: category.name,
                    category_color: category.color,
                    date: transaction.transaction_date,
                    created_at: transaction.created_at.with_timezone(&Utc),
                })
            })
            .collect())
    }
}
