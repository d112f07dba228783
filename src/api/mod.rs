//! API handlers for the Equipment Center REST endpoints

pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router: JSON API, HTML forms and API docs
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Inventory
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/import", post(items::import_defaults))
        .route("/items/:id", get(items::get_item))
        // Loans
        .route("/loans", get(loans::list_loans).post(loans::create_loan))
        .route("/loans/active", get(loans::list_active_loans))
        .route("/loans/:id/return", post(loans::return_loan))
        .route("/loans/:id/reminder", get(loans::get_reminder))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(crate::ui::routes(state))
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
