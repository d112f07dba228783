//! Loan (borrow) model and related types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::LoanStatus;

/// Stored timestamp layout. Lexicographic order matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Longest allowed loan, in days
pub const MAX_LOAN_DAYS: i64 = 7;

/// Format a timestamp the way it is stored in the logs table
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Whole days between today and the chosen return date, never less than one
pub fn loan_duration_days(today: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - today).num_days().max(1)
}

/// Loan record from database (a row of the `logs` audit table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub student_name: String,
    pub contact_info: String,
    pub item_id: i64,
    /// Item name at the time of the loan
    pub item_name: String,
    /// "Borrowed", or "Returned (Date: ...)" once closed
    pub action: String,
    pub borrow_time: NaiveDateTime,
    pub duration_days: i32,
    pub expected_return: NaiveDateTime,
    pub status: LoanStatus,
    pub returned_at: Option<NaiveDateTime>,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// An active loan whose expected return is already in the past
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.is_active() && self.expected_return < now
    }

    /// Label used by return pickers
    pub fn picker_label(&self) -> String {
        format!(
            "{} - {} (Borrowed: {})",
            self.student_name,
            self.item_name,
            format_timestamp(&self.borrow_time)
        )
    }
}

/// Active loan as shown in the logs view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveLoan {
    pub id: i64,
    pub student_name: String,
    pub contact_info: String,
    pub item_id: i64,
    pub item_name: String,
    pub borrow_time: NaiveDateTime,
    pub expected_return: NaiveDateTime,
    pub duration_days: i32,
    pub is_overdue: bool,
}

impl ActiveLoan {
    pub fn from_loan(loan: Loan, now: NaiveDateTime) -> Self {
        let is_overdue = loan.is_overdue(now);
        Self {
            id: loan.id,
            student_name: loan.student_name,
            contact_info: loan.contact_info,
            item_id: loan.item_id,
            item_name: loan.item_name,
            borrow_time: loan.borrow_time,
            expected_return: loan.expected_return,
            duration_days: loan.duration_days,
            is_overdue,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_overdue {
            "OVERDUE"
        } else {
            "Normal"
        }
    }
}

/// Borrow request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    /// Student name or ID
    #[validate(length(min = 1, message = "Student name / ID is required"))]
    pub student_name: String,
    /// Email or phone number
    #[serde(default)]
    pub contact_info: String,
    pub item_id: i64,
    /// Expected return date, between today and today + 7 days
    pub return_date: NaiveDate,
}

/// History listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoanQuery {
    /// Restrict to one status
    pub status: Option<LoanStatus>,
}

/// Reminder message for an active loan. Nothing is sent; the `mailto`
/// link opens the operator's mail client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReminderDraft {
    pub loan_id: i64,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Present when the contact looks like an email address
    pub mailto: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn sample(expected_return: &str, status: LoanStatus) -> Loan {
        Loan {
            id: 1,
            student_name: "Ada".into(),
            contact_info: "ada@example.com".into(),
            item_id: 5,
            item_name: "Canon EOS R5".into(),
            action: "Borrowed".into(),
            borrow_time: at("2026-10-10 09:30:00"),
            duration_days: 3,
            expected_return: at(expected_return),
            status,
            returned_at: None,
        }
    }

    #[test]
    fn test_duration_is_clamped_to_one_day() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(loan_duration_days(today, today), 1);
        assert_eq!(loan_duration_days(today, today.succ_opt().unwrap()), 1);
        assert_eq!(loan_duration_days(today, NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()), 7);
    }

    #[test]
    fn test_overdue_flag() {
        let now = at("2026-10-13 09:30:00");
        assert!(sample("2026-10-13 09:29:59", LoanStatus::Active).is_overdue(now));
        assert!(!sample("2026-10-13 09:30:01", LoanStatus::Active).is_overdue(now));
        assert!(!sample("2026-10-01 00:00:00", LoanStatus::Returned).is_overdue(now));
    }

    #[test]
    fn test_timestamp_format_sorts_chronologically() {
        let earlier = format_timestamp(&at("2026-09-30 23:59:59"));
        let later = format_timestamp(&at("2026-10-01 00:00:00"));
        assert!(earlier < later);
        assert_eq!(later, "2026-10-01 00:00:00");
    }

    #[test]
    fn test_labels() {
        let loan = sample("2026-10-13 09:30:00", LoanStatus::Active);
        assert_eq!(loan.picker_label(), "Ada - Canon EOS R5 (Borrowed: 2026-10-10 09:30:00)");
        let view = ActiveLoan::from_loan(loan, at("2026-10-14 00:00:00"));
        assert_eq!(view.status_label(), "OVERDUE");
    }
}
