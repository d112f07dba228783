//! Inventory item model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::Category;

/// Inventory item from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: Category,
    /// Units owned
    pub total_qty: i32,
    /// Units currently available to borrow
    pub in_stock_qty: i32,
}

impl Item {
    /// Label used by borrow pickers, e.g. `Leica M6 (Available: 1)`
    pub fn picker_label(&self) -> String {
        format!("{} (Available: {})", self.name, self.in_stock_qty)
    }
}

/// Inventory listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Only items with at least one unit in stock
    pub available: Option<bool>,
}

/// Add item request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub category: Category,
    #[validate(range(min = 1, message = "Total quantity must be at least 1"))]
    pub total_qty: i32,
}

/// Default catalog entry: (name, category, quantity)
pub type CatalogEntry = (&'static str, Category, i32);
