//! Return reminder drafts.
//!
//! Reminders are never delivered by the server. A draft carries the text and
//! a `mailto:` link that opens the operator's own mail client.

use crate::{
    config::RemindersConfig,
    error::{AppError, AppResult},
    models::loan::{format_timestamp, Loan, ReminderDraft},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReminderService {
    repository: Repository,
    config: RemindersConfig,
}

impl ReminderService {
    pub fn new(repository: Repository, config: RemindersConfig) -> Self {
        Self { repository, config }
    }

    /// Build the reminder for an active loan
    pub async fn draft(&self, loan_id: i64) -> AppResult<ReminderDraft> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        if !loan.is_active() {
            return Err(AppError::AlreadyReturned(loan_id));
        }

        tracing::debug!(loan_id, student = %loan.student_name, "Reminder draft generated");
        Ok(compose(&loan, &self.config.center_name))
    }
}

/// Reminder text and mail link for `loan`
pub fn compose(loan: &Loan, center_name: &str) -> ReminderDraft {
    let due = format_timestamp(&loan.expected_return);
    let subject = format!("Equipment Return Reminder: {}", loan.item_name);
    let body = format!(
        "Hi {name},\n\n\
         This is a friendly reminder that the equipment you borrowed ({item}) is due for return by {due}.\n\n\
         Please return it to the {center} as soon as possible.\n\n\
         Thank you!",
        name = loan.student_name,
        item = loan.item_name,
        due = due,
        center = center_name,
    );

    let recipient = loan.contact_info.trim().to_string();
    let mailto = looks_like_email(&recipient).then(|| {
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    });

    ReminderDraft {
        loan_id: loan.id,
        recipient,
        subject,
        body,
        mailto,
    }
}

/// A bare `user@host.tld` address. Characters that would start a new mailto
/// header or fragment are rejected so the contact cannot add fields to the link.
fn looks_like_email(contact: &str) -> bool {
    if contact
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '?' | '&' | '#' | '%' | ':' | '/'))
    {
        return false;
    }
    match contact.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}
