//! JSON error responses.
//!
//! Every failure leaves a handler as an [`ApiError`], rendered as
//! `{ "error": CODE, "message": text, "errors"?: { field: [messages] } }`.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fintrack_core::auth::PasswordError;
use fintrack_core::budget::BudgetError as BudgetRuleError;
use fintrack_core::period::PeriodError;
use fintrack_core::reports::ReportError;
use fintrack_core::transaction::TransactionError as TransactionRuleError;
use fintrack_db::repositories::{BudgetError, CategoryError, TransactionError, UserError};
use fintrack_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use validator::ValidationErrors;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// A 400 with a single message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// A 404 for the named resource.
    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(format!("{resource} not found")).into()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            fields: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::debug!(error = %self.error, "Request rejected");
        }

        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut body = json!({
            "error": self.error.error_code(),
            "message": self.error.public_message(),
        });
        if let Some(fields) = self.fields {
            body["errors"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string)
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            error: AppError::Validation("Validation error".to_string()),
            fields: Some(fields),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string()).into()
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        AppError::Internal(err.to_string()).into()
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string()).into()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => {
                AppError::Conflict("Email is already registered".to_string()).into()
            }
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::not_found("Category"),
            CategoryError::DuplicateName(name) => {
                AppError::Conflict(format!("Category '{name}' already exists")).into()
            }
            CategoryError::InUse => AppError::Conflict(
                "Category has transactions and cannot be deleted".to_string(),
            )
            .into(),
            CategoryError::TypeChangeInUse => AppError::BusinessRule(err.to_string()).into(),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionRuleError> for ApiError {
    fn from(err: TransactionRuleError) -> Self {
        match err {
            TransactionRuleError::TypeMismatch { .. } => {
                AppError::BusinessRule(err.to_string()).into()
            }
            TransactionRuleError::InvalidType(_) | TransactionRuleError::InvalidSort(_) => {
                Self::bad_request(err.to_string())
            }
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::not_found("Transaction"),
            TransactionError::CategoryNotFound(_) => Self::not_found("Category"),
            TransactionError::Rule(rule) => rule.into(),
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<BudgetRuleError> for ApiError {
    fn from(err: BudgetRuleError) -> Self {
        match err {
            BudgetRuleError::NotExpenseCategory => AppError::BusinessRule(err.to_string()).into(),
            BudgetRuleError::EndBeforeStart => Self::bad_request(err.to_string()),
            BudgetRuleError::Store(e) => AppError::Database(e.to_string()).into(),
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) => Self::not_found("Budget"),
            BudgetError::CategoryNotFound(_) => Self::not_found("Category"),
            BudgetError::Duplicate => AppError::Conflict(
                "A budget for this category and period already exists".to_string(),
            )
            .into(),
            BudgetError::Rule(rule) => rule.into(),
            BudgetError::Database(e) => e.into(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidMonth(_) | ReportError::InvalidDateRange { .. } => {
                Self::bad_request(err.to_string())
            }
            ReportError::Store(e) => AppError::Database(e.to_string()).into(),
        }
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_database_errors_are_masked() {
        let (status, body) = body_json(DbErr::Custom("connection refused".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_conflicts_map_to_409() {
        let (status, body) = body_json(CategoryError::InUse.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CONFLICT");

        let (status, _) = body_json(BudgetError::Duplicate.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_rule_violations_map_to_422() {
        let (status, body) =
            body_json(BudgetError::Rule(BudgetRuleError::NotExpenseCategory).into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");

        let (status, body) = body_json(CategoryError::TypeChangeInUse.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
    }

    #[tokio::test]
    async fn test_invalid_month_is_bad_request() {
        let (status, body) = body_json(ReportError::InvalidMonth("2024-13".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let errors = Sample {
            name: "ab".to_string(),
        }
        .validate()
        .unwrap_err();

        let (status, body) = body_json(errors.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["errors"]["name"][0], "too short");
    }
}
