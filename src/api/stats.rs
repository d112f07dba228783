//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::local_now};

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Inventory statistics
    pub inventory: InventoryStats,
    /// Loan statistics
    pub loans: LoanStats,
}

#[derive(Serialize, ToSchema)]
pub struct InventoryStats {
    /// Number of distinct items
    pub items: i64,
    /// Units owned across all items
    pub total_units: i64,
    /// Units available to borrow
    pub units_in_stock: i64,
    /// Units currently checked out
    pub units_on_loan: i64,
}

#[derive(Serialize, ToSchema)]
pub struct LoanStats {
    /// Active loans
    pub active: i64,
    /// Overdue loans
    pub overdue: i64,
}

/// Get inventory and loan statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.summary_at(local_now()).await?;
    Ok(Json(stats))
}
