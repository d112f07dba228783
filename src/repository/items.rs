//! Items repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        import_report::ImportReport,
        item::{CatalogEntry, CreateItem, Item},
    },
};

/// Inventory totals used by the stats endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct StockTotals {
    pub items: i64,
    pub total_units: i64,
    pub units_in_stock: i64,
}

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Sqlite>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List inventory, optionally only items with stock left
    pub async fn list(&self, available_only: bool) -> AppResult<Vec<Item>> {
        let query = if available_only {
            "SELECT * FROM items WHERE in_stock_qty > 0 ORDER BY id"
        } else {
            "SELECT * FROM items ORDER BY id"
        };

        let items = sqlx::query_as::<_, Item>(query).fetch_all(&self.pool).await?;
        Ok(items)
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Insert a new item with every unit in stock
    pub async fn create(&self, data: &CreateItem) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, category, total_qty, in_stock_qty)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(data.total_qty)
        .bind(data.total_qty)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Count inventory rows
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert `entries` only if the items table is empty.
    ///
    /// The emptiness check and the inserts share one transaction, so a
    /// concurrent import either sees the rows or fails on the write lock.
    pub async fn import_if_empty(&self, entries: &[CatalogEntry]) -> AppResult<ImportReport> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            return Ok(ImportReport::skipped(existing));
        }

        for (name, category, qty) in entries {
            sqlx::query(
                "INSERT INTO items (name, category, total_qty, in_stock_qty) VALUES (?, ?, ?, ?)",
            )
            .bind(*name)
            .bind(*category)
            .bind(*qty)
            .bind(*qty)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(ImportReport::imported(entries.len()))
    }

    /// Item count and unit totals
    pub async fn totals(&self) -> AppResult<StockTotals> {
        let totals = sqlx::query_as::<_, StockTotals>(
            r#"
            SELECT COUNT(*) AS items,
                   COALESCE(SUM(total_qty), 0) AS total_units,
                   COALESCE(SUM(in_stock_qty), 0) AS units_in_stock
            FROM items
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
