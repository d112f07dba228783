//! Default catalog import report

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What happened during a catalog import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Imported,
    /// The items table already had rows; nothing was inserted
    SkippedNotEmpty,
}

/// Report returned by the catalog import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub action: ImportAction,
    /// Rows inserted by this import
    pub imported: usize,
    /// Rows present before the import
    pub existing: i64,
    pub message: String,
}

impl ImportReport {
    pub fn imported(count: usize) -> Self {
        Self {
            action: ImportAction::Imported,
            imported: count,
            existing: 0,
            message: format!("Successfully imported {} items", count),
        }
    }

    pub fn skipped(existing: i64) -> Self {
        Self {
            action: ImportAction::SkippedNotEmpty,
            imported: 0,
            existing,
            message: format!(
                "Database is not empty ({} items). Clear it first to avoid duplicates.",
                existing
            ),
        }
    }
}
