//! Loans repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        loan::{format_timestamp, Loan},
    },
};

/// Fully resolved borrow, ready to be written
#[derive(Debug, Clone)]
pub struct NewLoan<'a> {
    pub student_name: &'a str,
    pub contact_info: &'a str,
    pub item_id: i64,
    pub borrow_time: NaiveDateTime,
    pub duration_days: i64,
    pub expected_return: NaiveDateTime,
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM logs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Loan history, newest first
    pub async fn list(&self, status: Option<LoanStatus>) -> AppResult<Vec<Loan>> {
        let loans = match status {
            Some(status) => {
                sqlx::query_as::<_, Loan>("SELECT * FROM logs WHERE status = ? ORDER BY id DESC")
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Loan>("SELECT * FROM logs ORDER BY id DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(loans)
    }

    /// Active loans in checkout order
    pub async fn list_active(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM logs WHERE status = ? ORDER BY id")
            .bind(LoanStatus::Active)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Take one unit out of stock and record the loan, atomically.
    ///
    /// The decrement only applies while `in_stock_qty > 0`, so two borrows
    /// racing for the last unit cannot both succeed.
    pub async fn create(&self, loan: &NewLoan<'_>) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let item_name: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE items SET in_stock_qty = in_stock_qty - 1
            WHERE id = ? AND in_stock_qty > 0
            RETURNING name
            "#,
        )
        .bind(loan.item_id)
        .fetch_optional(&mut *tx)
        .await?;

        let item_name = match item_name {
            Some(name) => name,
            None => {
                let existing: Option<String> =
                    sqlx::query_scalar("SELECT name FROM items WHERE id = ?")
                        .bind(loan.item_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                return Err(match existing {
                    Some(name) => AppError::Unavailable(name),
                    None => AppError::NotFound(format!("Item with id {} not found", loan.item_id)),
                });
            }
        };

        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO logs (
                student_name, contact_info, item_id, item_name, action,
                borrow_time, duration_days, expected_return, status
            )
            VALUES (?, ?, ?, ?, 'Borrowed', ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(loan.student_name)
        .bind(loan.contact_info)
        .bind(loan.item_id)
        .bind(&item_name)
        .bind(format_timestamp(&loan.borrow_time))
        .bind(loan.duration_days)
        .bind(format_timestamp(&loan.expected_return))
        .bind(LoanStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Close an active loan and put the unit back in stock, atomically
    pub async fn return_loan(&self, loan_id: i64, now: NaiveDateTime) -> AppResult<Loan> {
        let returned_at = format_timestamp(&now);
        let mut tx = self.pool.begin().await?;

        let item_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE logs
            SET status = ?, action = 'Returned (Date: ' || ? || ')', returned_at = ?
            WHERE id = ? AND status = ?
            RETURNING item_id
            "#,
        )
        .bind(LoanStatus::Returned)
        .bind(&returned_at)
        .bind(&returned_at)
        .bind(loan_id)
        .bind(LoanStatus::Active)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(item_id) = item_id else {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM logs WHERE id = ?)")
                .bind(loan_id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(if exists {
                AppError::AlreadyReturned(loan_id)
            } else {
                AppError::NotFound(format!("Loan with id {} not found", loan_id))
            });
        };

        let restocked = sqlx::query(
            "UPDATE items SET in_stock_qty = in_stock_qty + 1 WHERE id = ? AND in_stock_qty < total_qty",
        )
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

        if restocked.rows_affected() == 0 {
            tracing::warn!(loan_id, item_id, "Item already fully in stock, stock left unchanged");
        }

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM logs WHERE id = ?")
            .bind(loan_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs WHERE status = ?")
            .bind(LoanStatus::Active)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count active loans whose expected return is before `now`
    pub async fn count_overdue(&self, now: NaiveDateTime) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM logs WHERE status = ? AND expected_return < ?",
        )
        .bind(LoanStatus::Active)
        .bind(format_timestamp(&now))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
