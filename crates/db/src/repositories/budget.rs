//! Budget repository for budget database operations.

use chrono::NaiveDate;
use fintrack_core::budget::{BudgetError as RuleError, validate_budget};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::category::CategoryRepository;
use super::is_unique_violation;
use crate::entities::{budgets, categories, sea_orm_active_enums::BudgetPeriod};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found for this user.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Category not found for this user.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// A budget already exists for this category and period.
    #[error("A budget already exists for this category and period")]
    Duplicate,

    /// Budget violates a domain rule.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or replacing a budget.
#[derive(Debug, Clone)]
pub struct BudgetInput {
    /// Expense category the cap applies to.
    pub category_id: Uuid,
    /// Cap per period.
    pub amount: Decimal,
    /// Cadence.
    pub period: BudgetPeriod,
    /// First day.
    pub start_date: NaiveDate,
    /// Optional last day.
    pub end_date: Option<NaiveDate>,
}

/// Budget joined with its category.
#[derive(Debug, Clone)]
pub struct BudgetWithCategory {
    /// Budget record.
    pub budget: budgets::Model,
    /// Category record.
    pub category: categories::Model,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's budgets, optionally of one period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        period: Option<BudgetPeriod>,
    ) -> Result<Vec<BudgetWithCategory>, BudgetError> {
        let mut query = budgets::Entity::find().filter(budgets::Column::UserId.eq(user_id));
        if let Some(period) = period {
            query = query.filter(budgets::Column::Period.eq(period));
        }

        let rows = query
            .order_by_asc(budgets::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(budget, category)| {
                category.map(|category| BudgetWithCategory { budget, category })
            })
            .collect())
    }

    /// Finds one of the user's budgets.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the user has no such budget.
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<BudgetWithCategory, BudgetError> {
        let row = budgets::Entity::find_by_id(id)
            .filter(budgets::Column::UserId.eq(user_id))
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?;

        match row {
            Some((budget, Some(category))) => Ok(BudgetWithCategory { budget, category }),
            _ => Err(BudgetError::NotFound(id)),
        }
    }

    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::CategoryNotFound`, `BudgetError::Duplicate`, or a
    /// rule violation.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: BudgetInput,
    ) -> Result<BudgetWithCategory, BudgetError> {
        let category = self.checked_category(user_id, &input).await?;
        if self.exists(user_id, input.category_id, input.period, None).await? {
            return Err(BudgetError::Duplicate);
        }

        let now = chrono::Utc::now().into();
        let budget = budgets::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            category_id: Set(category.id),
            amount: Set(input.amount),
            period: Set(input.period),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(duplicate)?;

        tracing::info!(user_id = %user_id, budget_id = %budget.id, "Budget created");
        Ok(BudgetWithCategory { budget, category })
    }

    /// Replaces a budget's fields.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound`, `BudgetError::CategoryNotFound`,
    /// `BudgetError::Duplicate`, or a rule violation.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: BudgetInput,
    ) -> Result<BudgetWithCategory, BudgetError> {
        let existing = self.find(user_id, id).await?;
        let category = self.checked_category(user_id, &input).await?;
        if self
            .exists(user_id, input.category_id, input.period, Some(id))
            .await?
        {
            return Err(BudgetError::Duplicate);
        }

        let mut budget: budgets::ActiveModel = existing.budget.into();
        budget.category_id = Set(category.id);
        budget.amount = Set(input.amount);
        budget.period = Set(input.period);
        budget.start_date = Set(input.start_date);
        budget.end_date = Set(input.end_date);
        budget.updated_at = Set(chrono::Utc::now().into());

        let budget = budget.update(&self.db).await.map_err(duplicate)?;
        tracing::info!(user_id = %user_id, budget_id = %id, "Budget updated");
        Ok(BudgetWithCategory { budget, category })
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the user has no such budget.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(id));
        }
        tracing::info!(user_id = %user_id, budget_id = %id, "Budget deleted");
        Ok(())
    }

    async fn checked_category(
        &self,
        user_id: Uuid,
        input: &BudgetInput,
    ) -> Result<categories::Model, BudgetError> {
        let category = CategoryRepository::find_owned(&self.db, user_id, input.category_id)
            .await?
            .ok_or(BudgetError::CategoryNotFound(input.category_id))?;
        validate_budget(
            category.transaction_type.into(),
            input.start_date,
            input.end_date,
        )?;
        Ok(category)
    }

    async fn exists(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period: BudgetPeriod,
        except: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::CategoryId.eq(category_id))
            .filter(budgets::Column::Period.eq(period));
        if let Some(id) = except {
            query = query.filter(budgets::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}

fn duplicate(err: DbErr) -> BudgetError {
    if is_unique_violation(&err) {
        BudgetError::Duplicate
    } else {
        err.into()
    }
}
