//! Financial report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use fintrack_core::reports::{CategorySummary, FinancialOverview, MonthSummary, MonthTotals};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/month-summary", get(month_summary))
        .route("/reports/category-summary", get(category_summary))
        .route("/reports/monthly-evolution", get(monthly_evolution))
        .route("/reports/overview", get(overview))
}

/// Query string for the category summary.
#[derive(Debug, Default, Deserialize)]
pub struct CategorySummaryQuery {
    /// `yyyy-MM`, defaults to the current month.
    pub month: Option<String>,
}

/// Query string for the evolution report.
#[derive(Debug, Default, Deserialize)]
pub struct EvolutionQuery {
    /// How many months back, clamped to 1..=24.
    pub months: Option<i64>,
}

/// GET /reports/month-summary - This month against last month.
async fn month_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MonthSummary>> {
    let summary = state
        .report_generator()
        .month_summary(auth.id(), Utc::now().date_naive())
        .await?;
    Ok(Json(summary))
}

/// GET /reports/category-summary - Expense totals per category for a month.
async fn category_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CategorySummaryQuery>,
) -> ApiResult<Json<Vec<CategorySummary>>> {
    let summary = state
        .report_generator()
        .category_summary(auth.id(), query.month.as_deref(), Utc::now().date_naive())
        .await?;
    Ok(Json(summary))
}

/// GET /reports/monthly-evolution - Monthly totals, oldest first.
async fn monthly_evolution(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EvolutionQuery>,
) -> ApiResult<Json<Vec<MonthTotals>>> {
    let evolution = state
        .report_generator()
        .monthly_evolution(auth.id(), query.months, Utc::now().date_naive())
        .await?;
    Ok(Json(evolution))
}

/// GET /reports/overview - Dashboard snapshot.
async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FinancialOverview>> {
    let overview = state
        .report_generator()
        .overview(auth.id(), Utc::now().date_naive())
        .await?;
    Ok(Json(overview))
}
