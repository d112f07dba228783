//! Data models for the Equipment Center

pub mod enums;
pub mod import_report;
pub mod item;
pub mod loan;

// Re-export commonly used types
pub use enums::{Category, LoanStatus};
pub use import_report::{ImportAction, ImportReport};
pub use item::{CreateItem, Item};
pub use loan::{ActiveLoan, CreateLoan, Loan, ReminderDraft};
