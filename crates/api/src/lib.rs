//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Authentication middleware and the `AuthUser` extractor
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use fintrack_core::budget::BudgetProgressCalculator;
use fintrack_core::reports::ReportGenerator;
use fintrack_db::AggregationRepository;
use fintrack_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Creates the state from a connection and a JWT service.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
        }
    }

    fn aggregation(&self) -> Arc<AggregationRepository> {
        Arc::new(AggregationRepository::new((*self.db).clone()))
    }

    /// Budget progress calculator backed by the database.
    #[must_use]
    pub fn budget_calculator(&self) -> BudgetProgressCalculator {
        BudgetProgressCalculator::new(self.aggregation())
    }

    /// Report generator backed by the database.
    #[must_use]
    pub fn report_generator(&self) -> ReportGenerator {
        ReportGenerator::new(self.aggregation())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
