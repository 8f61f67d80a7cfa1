//! Category repository for category database operations.

use fintrack_core::category::{DEFAULT_CATEGORIES, DEFAULT_COLOR, DEFAULT_ICON};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::is_unique_violation;
use crate::entities::{budgets, categories, sea_orm_active_enums::TransactionType, transactions};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found for this user.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Another category of this user already has the name.
    #[error("A category with this name already exists: {0}")]
    DuplicateName(String),

    /// Transactions still reference the category.
    #[error("Category has transactions and cannot be deleted")]
    InUse,

    /// The type cannot change while transactions or budgets reference it.
    #[error("Category type cannot change while transactions or budgets use it")]
    TypeChangeInUse,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or replacing a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// `#RRGGBB`, defaults to grey.
    pub color: Option<String>,
    /// Icon identifier, defaults to `default`.
    pub icon: Option<String>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's categories by name, optionally of one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<categories::Model>, CategoryError> {
        let mut query = categories::Entity::find().filter(categories::Column::UserId.eq(user_id));
        if let Some(kind) = transaction_type {
            query = query.filter(categories::Column::TransactionType.eq(kind));
        }
        Ok(query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds one of the user's categories.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the user has no such category.
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<categories::Model, CategoryError> {
        Self::find_owned(&self.db, user_id, id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Looks up a category owned by `user_id` on any connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_owned<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(conn)
            .await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DuplicateName` if the name is taken.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        if self.name_taken(user_id, &input.name, None).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let now = chrono::Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name.clone()),
            transaction_type: Set(input.transaction_type),
            color: Set(input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            icon: Set(input.icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| duplicate_name(e, &input.name))?;

        tracing::info!(user_id = %user_id, category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Replaces a category's fields. Missing color/icon keep their values.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound`, `CategoryError::DuplicateName`, or
    /// `CategoryError::TypeChangeInUse` when switching the type of a category
    /// that transactions or budgets still reference.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let existing = self.find(user_id, id).await?;
        if existing.name != input.name && self.name_taken(user_id, &input.name, Some(id)).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }
        if existing.transaction_type != input.transaction_type && self.referenced(id).await? {
            return Err(CategoryError::TypeChangeInUse);
        }

        let name = input.name.clone();
        let mut category: categories::ActiveModel = existing.into();
        category.name = Set(input.name);
        category.transaction_type = Set(input.transaction_type);
        if let Some(color) = input.color {
            category.color = Set(color);
        }
        if let Some(icon) = input.icon {
            category.icon = Set(icon);
        }
        category.updated_at = Set(chrono::Utc::now().into());

        let category = category
            .update(&self.db)
            .await
            .map_err(|e| duplicate_name(e, &name))?;
        tracing::info!(user_id = %user_id, category_id = %id, "Category updated");
        Ok(category)
    }

    /// Deletes a category and its budgets.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound`, or `CategoryError::InUse` while
    /// transactions reference it.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), CategoryError> {
        let category = self.find(user_id, id).await?;

        let in_use = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if in_use > 0 {
            return Err(CategoryError::InUse);
        }

        categories::Entity::delete_by_id(category.id)
            .exec(&self.db)
            .await?;
        tracing::info!(user_id = %user_id, category_id = %id, "Category deleted");
        Ok(())
    }

    /// Inserts the default categories for a new user.
    ///
    /// Returns how many were created.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_defaults<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<usize, DbErr> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let models = DEFAULT_CATEGORIES.iter().map(|c| categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(c.name.to_string()),
            transaction_type: Set(c.transaction_type.into()),
            color: Set(c.color.to_string()),
            icon: Set(c.icon.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        });

        categories::Entity::insert_many(models).exec(conn).await?;
        Ok(DEFAULT_CATEGORIES.len())
    }

    async fn referenced(&self, id: Uuid) -> Result<bool, DbErr> {
        let transactions = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if transactions > 0 {
            return Ok(true);
        }
        let budgets = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        Ok(budgets > 0)
    }

    async fn name_taken(
        &self,
        user_id: Uuid,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(categories::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}

fn duplicate_name(err: DbErr, name: &str) -> CategoryError {
    if is_unique_violation(&err) {
        CategoryError::DuplicateName(name.to_string())
    } else {
        err.into()
    }
}
