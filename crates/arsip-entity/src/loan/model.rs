//! Loan entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default lending period when no due date is given.
pub const DEFAULT_LOAN_DAYS: i64 = 7;

/// A lending record for one archive. A loan is active until its
/// `return_date` is set; at most one active loan may exist per archive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    /// Unique loan identifier.
    pub id: Uuid,
    /// The archive being lent out.
    pub archive_id: Uuid,
    /// Reference number of the loan letter (nomor surat). Unique among
    /// active loans.
    pub surat_number: String,
    /// Who physically holds the record.
    pub borrower_name: String,
    /// Why the record was borrowed.
    pub purpose: String,
    /// Day the record left the archive.
    pub borrow_date: NaiveDate,
    /// Day the record is expected back.
    pub due_date: NaiveDate,
    /// Day the record actually came back; `None` while on loan.
    pub return_date: Option<NaiveDate>,
    /// The user who registered the loan.
    pub created_by: Uuid,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// An active loan past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.return_date.is_none() && today > self.due_date
    }
}

/// Data required to register a new loan.
#[derive(Debug, Clone)]
pub struct CreateLoan {
    pub archive_id: Uuid,
    pub surat_number: String,
    pub borrower_name: String,
    pub purpose: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub created_by: Uuid,
}
