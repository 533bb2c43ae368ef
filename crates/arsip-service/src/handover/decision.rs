use std::collections::HashSet;

use arsip_core::{AppError, AppResult};
use arsip_entity::handover::HandoverDecision;
use chrono::NaiveDate;
use uuid::Uuid;

/// Decision payload for a pending handover proposal.
///
/// Archives listed in `approved_ids` are handed over; archives in
/// `rejected_ids` stay with the surrendering party. Record number and
/// handover date are mandatory whenever anything is approved, the
/// rejection reason whenever anything is rejected.
#[derive(Debug, Clone, Default)]
pub struct DecideHandoverInput {
    pub approved_ids: Vec<Uuid>,
    pub rejected_ids: Vec<Uuid>,
    pub record_number: Option<String>,
    pub handover_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

/// Turns a raw decision payload into a [`HandoverDecision`].
///
/// Every archive attached to the proposal must appear in exactly one of
/// the two lists. Ids outside the proposal, archives left undecided, and
/// missing approval or rejection details all fail before any write
/// happens.
pub fn plan_decision(
    proposal_archive_ids: &[Uuid],
    input: DecideHandoverInput,
) -> AppResult<HandoverDecision> {
    let approved = dedupe(&input.approved_ids);
    let rejected = dedupe(&input.rejected_ids);

    if approved.is_empty() && rejected.is_empty() {
        return Err(AppError::validation(
            "A decision must approve or reject at least one archive",
        ));
    }

    let rejected_set: HashSet<Uuid> = rejected.iter().copied().collect();
    if let Some(id) = approved.iter().find(|id| rejected_set.contains(id)) {
        return Err(AppError::validation(format!(
            "Archive {id} cannot be both approved and rejected"
        )));
    }

    let members: HashSet<Uuid> = proposal_archive_ids.iter().copied().collect();
    if let Some(id) = approved
        .iter()
        .chain(rejected.iter())
        .find(|id| !members.contains(id))
    {
        return Err(AppError::precondition(format!(
            "Archive {id} does not belong to this proposal"
        )));
    }

    let undecided = proposal_archive_ids.len() - approved.len() - rejected.len();
    if undecided > 0 {
        return Err(AppError::precondition(format!(
            "Every archive in the proposal must be decided; {undecided} archive(s) were left out"
        )));
    }

    let approval = if approved.is_empty() {
        None
    } else {
        let record_number = trimmed(input.record_number.as_deref()).ok_or_else(|| {
            AppError::precondition("Approving archives requires a handover record number")
        })?;
        let handover_date = input
            .handover_date
            .ok_or_else(|| AppError::precondition("Approving archives requires a handover date"))?;
        Some((record_number, handover_date))
    };

    let rejection_reason = if rejected.is_empty() {
        None
    } else {
        Some(trimmed(input.rejection_reason.as_deref()).ok_or_else(|| {
            AppError::precondition("Rejecting archives requires a rejection reason")
        })?)
    };

    let notes = trimmed(input.notes.as_deref());

    match (approval, rejection_reason) {
        (Some((record_number, handover_date)), None) => Ok(HandoverDecision::ApproveAll {
            record_number,
            handover_date,
            notes,
        }),
        (None, Some(rejection_reason)) => Ok(HandoverDecision::RejectAll { rejection_reason }),
        (Some((record_number, handover_date)), Some(rejection_reason)) => {
            Ok(HandoverDecision::Split {
                approved_ids: approved,
                rejected_ids: rejected,
                record_number,
                handover_date,
                notes,
                rejection_reason,
            })
        }
        (None, None) => Err(AppError::validation(
            "A decision must approve or reject at least one archive",
        )),
    }
}

/// Removes duplicate ids while keeping first-seen order.
pub(crate) fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
