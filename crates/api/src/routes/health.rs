//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness payload. The process is up whenever this answers; the
/// database field only reports whether a ping succeeded.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `UP`.
    pub status: &'static str,
    /// `UP` or `DOWN`.
    pub database: &'static str,
    /// Crate version.
    pub version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "UP",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "DOWN"
        }
    };

    Json(HealthResponse {
        status: "UP",
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
