//! Registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use fintrack_core::auth::{UserRole, hash_password, verify_password};
use fintrack_db::{UserRepository, entities::users};
use fintrack_shared::{
    AppError,
    auth::{AuthResponse, UserInfo},
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::input;
use crate::AppState;
use crate::error::ApiResult;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Request body for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(deserialize_with = "input::trimmed")]
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    /// Login email.
    #[serde(deserialize_with = "input::email")]
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[serde(deserialize_with = "input::email")]
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Converts a stored user into its public shape.
pub fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name,
        email: user.email,
        role: UserRole::from(user.role).as_str().to_string(),
        created_at: user.created_at.to_utc(),
        updated_at: user.updated_at.to_utc(),
    }
}

fn issue_token(state: &AppState, user: users::Model) -> ApiResult<AuthResponse> {
    let role = UserRole::from(user.role);
    let token = state
        .jwt_service
        .generate_access_token(user.id, &user.email, role.as_str())?;
    Ok(AuthResponse::bearer(
        token,
        state.jwt_service.access_token_expires_in(),
        user_info(user),
    ))
}

/// POST /auth/register - Create an account and sign in.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = UserRepository::new((*state.db).clone())
        .register(
            &payload.name,
            &payload.email,
            &password_hash,
            UserRole::User.into(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /auth/login - Exchange credentials for a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    payload.validate()?;

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());
    let email = payload.email;

    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_email(&email)
        .await?
    else {
        info!(email = %email, "Login attempt for unknown email");
        return Err(invalid().into());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid().into());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_token(&state, user)?))
}
