//! Equipment Center
//!
//! Checkout tracker for a shared equipment pool: staff record borrow and
//! return events against an inventory table kept in a local SQLite file.
//! Served as HTML forms and as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod ui;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub assets: Arc<ui::UiAssets>,
}

impl AppState {
    /// Wire services and UI assets around an opened repository
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.reminders.clone());
        let assets = ui::UiAssets::load(&config.ui);

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            assets: Arc::new(assets),
        }
    }
}
