//! Statistics service

use chrono::NaiveDateTime;

use crate::{
    api::stats::{InventoryStats, LoanStats, StatsResponse},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Inventory and loan counters as of `now`
    pub async fn summary_at(&self, now: NaiveDateTime) -> AppResult<StatsResponse> {
        let totals = self.repository.items.totals().await?;
        let active = self.repository.loans.count_active().await?;
        let overdue = self.repository.loans.count_overdue(now).await?;

        Ok(StatsResponse {
            inventory: InventoryStats {
                items: totals.items,
                total_units: totals.total_units,
                units_in_stock: totals.units_in_stock,
                units_on_loan: totals.total_units - totals.units_in_stock,
            },
            loans: LoanStats { active, overdue },
        })
    }
}
