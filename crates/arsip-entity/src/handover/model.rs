//! Handover proposal entity models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::HandoverStatus;

/// A proposal to formally hand a set of archives over to another party.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HandoverProposal {
    /// Unique proposal identifier.
    pub id: Uuid,
    /// Unit or person giving the archives up.
    pub surrendering_party: String,
    /// Unit or person receiving the archives.
    pub receiving_party: String,
    /// Day the proposal was submitted.
    pub proposal_date: NaiveDate,
    /// Current state of the proposal.
    pub status: HandoverStatus,
    /// Official record number (nomor berita acara), set on approval and
    /// unique across proposals.
    pub record_number: Option<String>,
    /// Day the handover was formally executed, set on approval.
    pub handover_date: Option<NaiveDate>,
    /// Free-form notes recorded with the approval.
    pub notes: Option<String>,
    /// Why the proposal was declined, set on rejection.
    pub rejection_reason: Option<String>,
    /// The user who submitted the proposal.
    pub created_by: Uuid,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl HandoverProposal {
    pub fn is_pending(&self) -> bool {
        self.status == HandoverStatus::Pending
    }
}

/// Link between a proposal and one of its archives.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HandoverArchive {
    pub id: Uuid,
    pub proposal_id: Uuid,
    pub archive_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Data required to submit a new proposal.
#[derive(Debug, Clone)]
pub struct CreateHandover {
    pub surrendering_party: String,
    pub receiving_party: String,
    pub proposal_date: NaiveDate,
    pub created_by: Uuid,
}
