//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, items, loans, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Center API",
        version = "0.1.0",
        description = "Equipment checkout tracker REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::import_defaults,
        // Loans
        loans::list_loans,
        loans::list_active_loans,
        loans::create_loan,
        loans::return_loan,
        loans::get_reminder,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Items
            crate::models::item::Item,
            crate::models::item::CreateItem,
            crate::models::enums::Category,
            crate::models::import_report::ImportReport,
            crate::models::import_report::ImportAction,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::ActiveLoan,
            crate::models::loan::CreateLoan,
            crate::models::loan::ReminderDraft,
            crate::models::enums::LoanStatus,
            loans::ReturnResponse,
            // Stats
            stats::StatsResponse,
            stats::InventoryStats,
            stats::LoanStats,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Inventory management"),
        (name = "loans", description = "Borrow, return and reminders"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
