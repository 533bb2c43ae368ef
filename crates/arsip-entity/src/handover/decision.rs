//! Validated handover decisions.
//!
//! A [`HandoverDecision`] is the checked outcome of an administrator's
//! review form. Building one performs no I/O; applying one is a single
//! database transaction.

use chrono::NaiveDate;
use uuid::Uuid;

use super::model::HandoverProposal;

/// What an administrator decided about a pending proposal.
#[derive(Debug, Clone, PartialEq)]
pub enum HandoverDecision {
    /// Every archive in the proposal is accepted.
    ApproveAll {
        record_number: String,
        handover_date: NaiveDate,
        notes: Option<String>,
    },
    /// Every archive in the proposal is declined.
    RejectAll { rejection_reason: String },
    /// The proposal is split: the approved archives move to a new
    /// approved proposal, the original keeps the rejected ones.
    Split {
        approved_ids: Vec<Uuid>,
        rejected_ids: Vec<Uuid>,
        record_number: String,
        handover_date: NaiveDate,
        notes: Option<String>,
        rejection_reason: String,
    },
}

impl HandoverDecision {
    /// The official record number this decision would claim, if any.
    pub fn record_number(&self) -> Option<&str> {
        match self {
            Self::ApproveAll { record_number, .. } | Self::Split { record_number, .. } => {
                Some(record_number)
            }
            Self::RejectAll { .. } => None,
        }
    }
}

/// The proposals a decision produced or mutated.
///
/// Approve-all yields only `approved`, reject-all only `rejected`, and a
/// split yields both: `approved` is the newly created proposal carrying
/// the accepted archives and `rejected` is the mutated original.
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub approved: Option<HandoverProposal>,
    pub rejected: Option<HandoverProposal>,
}
