//! Current-user endpoint.

use axum::{Json, Router, extract::State, routing::get};
use fintrack_db::UserRepository;
use fintrack_shared::auth::UserInfo;

use super::auth::user_info;
use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", get(me))
}

/// GET /users/me - The authenticated user's profile.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserInfo>> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(Json(user_info(user)))
}
