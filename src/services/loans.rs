//! Loan management service

use chrono::{Duration, NaiveDateTime};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        loan::{loan_duration_days, ActiveLoan, CreateLoan, Loan, MAX_LOAN_DAYS},
    },
    repository::{loans::NewLoan, Repository},
};

use super::local_now;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Loan history, newest first
    pub async fn history(&self, status: Option<LoanStatus>) -> AppResult<Vec<Loan>> {
        self.repository.loans.list(status).await
    }

    /// Loans that can still be returned, in checkout order
    pub async fn open_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list_active().await
    }

    /// Active loans flagged against the current time
    pub async fn active_loans(&self) -> AppResult<Vec<ActiveLoan>> {
        self.active_loans_at(local_now()).await
    }

    pub async fn active_loans_at(&self, now: NaiveDateTime) -> AppResult<Vec<ActiveLoan>> {
        let loans = self.repository.loans.list_active().await?;
        Ok(loans
            .into_iter()
            .map(|loan| ActiveLoan::from_loan(loan, now))
            .collect())
    }

    /// Borrow an item
    pub async fn borrow(&self, request: CreateLoan) -> AppResult<Loan> {
        self.borrow_at(request, local_now()).await
    }

    /// Borrow an item as of `now`.
    ///
    /// The return date must fall within `[today, today + 7 days]`; the loan
    /// is due on that date at the current time of day.
    pub async fn borrow_at(&self, mut request: CreateLoan, now: NaiveDateTime) -> AppResult<Loan> {
        request.student_name = request.student_name.trim().to_string();
        request.contact_info = request.contact_info.trim().to_string();
        request.validate()?;

        let today = now.date();
        let latest = today + Duration::days(MAX_LOAN_DAYS);
        if request.return_date < today || request.return_date > latest {
            return Err(AppError::Validation(format!(
                "Return date must be between {} and {}",
                today, latest
            )));
        }

        let duration_days = loan_duration_days(today, request.return_date);
        let expected_return = request.return_date.and_time(now.time());

        let loan = self
            .repository
            .loans
            .create(&NewLoan {
                student_name: &request.student_name,
                contact_info: &request.contact_info,
                item_id: request.item_id,
                borrow_time: now,
                duration_days,
                expected_return,
            })
            .await?;

        tracing::info!(
            loan_id = loan.id,
            item = %loan.item_name,
            student = %loan.student_name,
            duration_days,
            "Equipment borrowed"
        );
        Ok(loan)
    }

    /// Return a borrowed item
    pub async fn return_loan(&self, loan_id: i64) -> AppResult<Loan> {
        self.return_loan_at(loan_id, local_now()).await
    }

    pub async fn return_loan_at(&self, loan_id: i64, now: NaiveDateTime) -> AppResult<Loan> {
        let loan = self.repository.loans.return_loan(loan_id, now).await?;
        tracing::info!(loan_id, item = %loan.item_name, "Equipment returned");
        Ok(loan)
    }
}
