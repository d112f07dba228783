//! Business logic services

pub mod catalog;
pub mod loans;
pub mod reminders;
pub mod stats;

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::{config::RemindersConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub reminders: reminders::ReminderService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, reminders_config: RemindersConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            reminders: reminders::ReminderService::new(repository.clone(), reminders_config),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }
}

/// Local wall-clock time at second precision, as stored in the logs table
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
