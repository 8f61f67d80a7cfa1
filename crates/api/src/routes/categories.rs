//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use fintrack_core::category::is_hex_color;
use fintrack_core::transaction::TransactionType;
use fintrack_db::{
    CategoryRepository,
    entities::categories,
    repositories::CategoryInput,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::input::{trimmed, trimmed_opt};
use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

/// Request body for creating or replacing a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Category name, unique per user.
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// `#RRGGBB` color.
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "hex_color"))]
    pub color: Option<String>,
    /// Icon name.
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 50, message = "Icon must not exceed 50 characters"))]
    pub icon: Option<String>,
}

fn hex_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color")
            .with_message("Color must be in hexadecimal format (#RRGGBB)".into()))
    }
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            transaction_type: req.transaction_type.into(),
            color: req.color,
            icon: req.icon,
        }
    }
}

/// Query string for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// Only categories of this type, in any case.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// Parses an optional `?type=` filter; blank means no filter.
pub(crate) fn type_filter(raw: Option<&str>) -> ApiResult<Option<TransactionType>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Ok(Some(text.parse::<TransactionType>()?)),
    }
}

/// A category as returned by the API.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// `#RRGGBB` color.
    pub color: String,
    /// Icon name.
    pub icon: String,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<categories::Model> for CategoryResponse {
    fn from(c: categories::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            transaction_type: c.transaction_type.into(),
            color: c.color,
            icon: c.icon,
            created_at: c.created_at.to_utc(),
            updated_at: c.updated_at.to_utc(),
        }
    }
}

fn repo(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

/// GET /categories - List the user's categories.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let transaction_type = type_filter(query.transaction_type.as_deref())?;
    let categories = repo(&state)
        .list(auth.user_id(), transaction_type.map(Into::into))
        .await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET `/categories/{id}` - One category.
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = repo(&state).find(auth.user_id(), id).await?;
    Ok(Json(category.into()))
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    payload.validate()?;
    let category = repo(&state).create(auth.user_id(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT `/categories/{id}` - Replace a category.
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    payload.validate()?;
    let category = repo(&state)
        .update(auth.user_id(), id, payload.into())
        .await?;
    Ok(Json(category.into()))
}

/// DELETE `/categories/{id}` - Remove an unused category.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo(&state).delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
