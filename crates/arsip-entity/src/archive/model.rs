//! Archive entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::retention::{self, RetentionAssessment};
use super::status::ArchiveStatus;

/// A physical record registered in the archive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Archive {
    /// Unique archive identifier.
    pub id: Uuid,
    /// Short description of the record.
    pub title: String,
    /// Date the underlying document was produced. Drives retention.
    pub document_date: Option<NaiveDate>,
    /// Classification code, e.g. `KU.01.03`. The first dot-segment
    /// selects the retention schedule row.
    pub classification_code: Option<String>,
    /// Date the record entered the archive.
    pub entry_date: NaiveDate,
    /// Active retention fallback in years, used when the classification
    /// code matches no schedule row.
    pub retention_years: i32,
    /// Cached lifecycle phase, refreshed on writes and by recalculation.
    pub status: ArchiveStatus,
    /// The user responsible for this record.
    pub owner_id: Uuid,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Archive {
    /// Run the retention engine against this record as of the given day.
    pub fn assess(&self, as_of: NaiveDate) -> RetentionAssessment {
        retention::assess_with_default(
            self.document_date,
            self.classification_code.as_deref(),
            i64::from(self.retention_years),
            as_of,
        )
    }
}

/// Data required to register a new archive.
#[derive(Debug, Clone)]
pub struct CreateArchive {
    pub title: String,
    pub document_date: Option<NaiveDate>,
    pub classification_code: Option<String>,
    pub entry_date: NaiveDate,
    pub retention_years: i32,
    /// Status derived at intake by the retention engine.
    pub status: ArchiveStatus,
    pub owner_id: Uuid,
}
