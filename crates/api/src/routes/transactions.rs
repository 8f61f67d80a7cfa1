//! Transaction routes: CRUD, filtered listing and period summary.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::reports::TransactionSummary;
use fintrack_core::transaction::{TransactionSort, TransactionType};
use fintrack_db::{
    TransactionRepository,
    repositories::{TransactionFilter, TransactionInput, TransactionWithCategory},
};
use fintrack_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::categories::{CategoryResponse, type_filter};
use super::input::{trimmed, trimmed_opt};
use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/summary", get(transaction_summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

/// Rejects zero and negative amounts.
pub(crate) fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("Amount must be positive".into()))
    }
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct TransactionRequest {
    /// What the money was for.
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 3, max = 200, message = "Description must be between 3 and 200 characters"))]
    pub description: String,
    /// Positive amount.
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    /// Income or expense; must match the category.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category the transaction is filed under.
    pub category_id: Uuid,
    /// Day the transaction happened.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub notes: Option<String>,
    /// Whether it repeats.
    pub recurring: Option<bool>,
}

impl From<TransactionRequest> for TransactionInput {
    fn from(req: TransactionRequest) -> Self {
        Self {
            description: req.description,
            amount: req.amount,
            transaction_type: req.transaction_type.into(),
            category_id: req.category_id,
            date: req.date,
            notes: req.notes,
            recurring: req.recurring.unwrap_or(false),
        }
    }
}

/// Query string for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    /// Only this type, in any case.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Only this category.
    pub category_id: Option<Uuid>,
    /// Earliest date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive description substring.
    pub search: Option<String>,
    /// Zero-based page.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// `field[,asc|desc]`.
    pub sort: Option<String>,
}

impl TransactionQuery {
    fn filter(&self) -> ApiResult<TransactionFilter> {
        Ok(TransactionFilter {
            transaction_type: type_filter(self.transaction_type.as_deref())?.map(Into::into),
            category_id: self.category_id,
            start_date: self.start_date,
            end_date: self.end_date,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    fn sort(&self) -> ApiResult<TransactionSort> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(TransactionSort::default()),
            Some(text) => Ok(text.parse::<TransactionSort>()?),
        }
    }
}

/// Query string for the summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Range start; defaults with the end to the current month.
    pub start_date: Option<NaiveDate>,
    /// Range end.
    pub end_date: Option<NaiveDate>,
}

/// A transaction as returned by the API.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Day the transaction happened.
    pub date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
    /// Whether it repeats.
    pub recurring: bool,
    /// Category it is filed under.
    pub category: CategoryResponse,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionWithCategory> for TransactionResponse {
    fn from(row: TransactionWithCategory) -> Self {
        let t = row.transaction;
        Self {
            id: t.id,
            description: t.description,
            amount: t.amount,
            transaction_type: t.transaction_type.into(),
            date: t.transaction_date,
            notes: t.notes,
            recurring: t.is_recurring,
            category: row.category.into(),
            created_at: t.created_at.to_utc(),
            updated_at: t.updated_at.to_utc(),
        }
    }
}

fn repo(state: &AppState) -> TransactionRepository {
    TransactionRepository::new((*state.db).clone())
}

/// GET /transactions - Filtered, sorted page of transactions.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<PageResponse<TransactionResponse>>> {
    let sort = query.sort()?;
    let filter = query.filter()?;
    let page = PageRequest::new(query.page, query.size);

    let (rows, total) = repo(&state)
        .list(auth.user_id(), &filter, page, sort)
        .await?;

    Ok(Json(PageResponse::new(rows, page, total).map(Into::into)))
}

/// GET /transactions/summary - Income, expense and balance for a date range.
async fn transaction_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<TransactionSummary>> {
    let summary = state
        .report_generator()
        .transaction_summary(
            auth.id(),
            query.start_date,
            query.end_date,
            Utc::now().date_naive(),
        )
        .await?;
    Ok(Json(summary))
}

/// GET `/transactions/{id}` - One transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TransactionResponse>> {
    let row = repo(&state).find(auth.user_id(), id).await?;
    Ok(Json(row.into()))
}

/// POST /transactions - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    payload.validate()?;
    let row = repo(&state).create(auth.user_id(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT `/transactions/{id}` - Replace a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    payload.validate()?;
    let row = repo(&state)
        .update(auth.user_id(), id, payload.into())
        .await?;
    Ok(Json(row.into()))
}

/// DELETE `/transactions/{id}` - Remove a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo(&state).delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::transaction::{SortDirection, SortField};
    use rust_decimal_macros::dec;

    fn request(description: &str, amount: Decimal) -> TransactionRequest {
        TransactionRequest {
            description: description.to_string(),
            amount,
            transaction_type: TransactionType::Expense,
            category_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            notes: None,
            recurring: None,
        }
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(request("Lunch", dec!(0.01)).validate().is_ok());
        assert!(request("Lunch", dec!(0)).validate().is_err());
        assert!(request("Lunch", dec!(-5)).validate().is_err());
    }

    #[test]
    fn test_description_length() {
        let errors = request("ab", dec!(1)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
        assert!(request(&"x".repeat(201), dec!(1)).validate().is_err());
    }

    #[test]
    fn test_recurring_defaults_to_false() {
        let input: TransactionInput = request("Lunch", dec!(10)).into();
        assert!(!input.recurring);
    }

    #[test]
    fn test_query_sort_defaults_and_parses() {
        let query = TransactionQuery::default();
        assert_eq!(query.sort().unwrap(), TransactionSort::default());

        let query = TransactionQuery {
            sort: Some("amount,asc".to_string()),
            ..TransactionQuery::default()
        };
        let sort = query.sort().unwrap();
        assert_eq!(sort.field, SortField::Amount);
        assert_eq!(sort.direction, SortDirection::Asc);

        let query = TransactionQuery {
            sort: Some("colour".to_string()),
            ..TransactionQuery::default()
        };
        assert!(query.sort().is_err());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = TransactionQuery {
            search: Some("   ".to_string()),
            ..TransactionQuery::default()
        };
        assert!(query.filter().unwrap().search.is_none());
    }

    fn from_json(description: &str) -> TransactionRequest {
        serde_json::from_value(serde_json::json!({
            "description": description,
            "amount": "12.50",
            "type": "EXPENSE",
            "category_id": Uuid::nil(),
            "date": "2024-03-01",
            "notes": "  ",
        }))
        .unwrap()
    }

    #[test]
    fn test_description_length_counts_trimmed_text() {
        let errors = from_json("  ab  ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let errors = from_json("          ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_padded_description_is_stored_trimmed() {
        let req = from_json("  Lunch  ");
        assert!(req.validate().is_ok());

        let input: TransactionInput = req.into();
        assert_eq!(input.description, "Lunch");
        assert!(input.notes.is_none());
    }

    #[test]
    fn test_type_filter_ignores_case() {
        let query = TransactionQuery {
            transaction_type: Some("income".to_string()),
            ..TransactionQuery::default()
        };
        assert!(query.filter().unwrap().transaction_type.is_some());

        let query = TransactionQuery {
            transaction_type: Some("transfer".to_string()),
            ..TransactionQuery::default()
        };
        assert!(query.filter().is_err());
    }
}
