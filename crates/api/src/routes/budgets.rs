//! Budget routes: CRUD and spending progress.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::budget::BudgetProgress;
use fintrack_core::period::{BudgetPeriod, PeriodError};
use fintrack_db::{
    BudgetRepository,
    repositories::{BudgetInput, BudgetWithCategory},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::categories::CategoryResponse;
use super::transactions::positive_amount;
use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/progress", get(budget_progress))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

/// Request body for creating or replacing a budget.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "end_not_before_start"))]
pub struct BudgetRequest {
    /// Expense category the budget caps.
    pub category_id: Uuid,
    /// Spending limit per period.
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    /// Period the limit applies to.
    pub period: BudgetPeriod,
    /// First day the budget applies.
    pub start_date: NaiveDate,
    /// Last day, open-ended when absent.
    pub end_date: Option<NaiveDate>,
}

fn end_not_before_start(req: &BudgetRequest) -> Result<(), ValidationError> {
    match req.end_date {
        Some(end) if end < req.start_date => Err(ValidationError::new("end_date")
            .with_message("End date must be on or after start date".into())),
        _ => Ok(()),
    }
}

impl From<BudgetRequest> for BudgetInput {
    fn from(req: BudgetRequest) -> Self {
        Self {
            category_id: req.category_id,
            amount: req.amount,
            period: req.period.into(),
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Query string for listing budgets.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetQuery {
    /// Only budgets with this period, in any case.
    pub period: Option<String>,
}

impl BudgetQuery {
    fn period(&self) -> Result<Option<BudgetPeriod>, PeriodError> {
        self.period.as_deref().map(str::parse).transpose()
    }
}

/// A budget as returned by the API.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: Uuid,
    /// Spending limit per period.
    pub amount: Decimal,
    /// Period kind.
    pub period: BudgetPeriod,
    /// First day the budget applies.
    pub start_date: NaiveDate,
    /// Last day, if any.
    pub end_date: Option<NaiveDate>,
    /// Category the budget caps.
    pub category: CategoryResponse,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<BudgetWithCategory> for BudgetResponse {
    fn from(row: BudgetWithCategory) -> Self {
        let b = row.budget;
        Self {
            id: b.id,
            amount: b.amount,
            period: b.period.into(),
            start_date: b.start_date,
            end_date: b.end_date,
            category: row.category.into(),
            created_at: b.created_at.to_utc(),
            updated_at: b.updated_at.to_utc(),
        }
    }
}

fn repo(state: &AppState) -> BudgetRepository {
    BudgetRepository::new((*state.db).clone())
}

/// GET /budgets - List the user's budgets.
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BudgetQuery>,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let period = query.period()?;
    let budgets = repo(&state)
        .list(auth.user_id(), period.map(Into::into))
        .await?;
    Ok(Json(budgets.into_iter().map(Into::into).collect()))
}

/// GET /budgets/progress - Spending against every budget for the current period.
async fn budget_progress(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BudgetProgress>>> {
    let progress = state
        .budget_calculator()
        .progress_for_user(auth.id(), Utc::now().date_naive())
        .await?;
    Ok(Json(progress))
}

/// GET `/budgets/{id}` - One budget.
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BudgetResponse>> {
    let row = repo(&state).find(auth.user_id(), id).await?;
    Ok(Json(row.into()))
}

/// POST /budgets - Create a budget for an expense category.
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    payload.validate()?;
    let row = repo(&state).create(auth.user_id(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT `/budgets/{id}` - Replace a budget.
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetRequest>,
) -> ApiResult<Json<BudgetResponse>> {
    payload.validate()?;
    let row = repo(&state)
        .update(auth.user_id(), id, payload.into())
        .await?;
    Ok(Json(row.into()))
}

/// DELETE `/budgets/{id}` - Remove a budget.
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo(&state).delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
