//! Handover proposal lifecycle: creation, decisions, availability checks.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_core::types::{PageRequest, PageResponse};
use arsip_database::repositories::{ArchiveRepository, HandoverRepository, LoanRepository};
use arsip_entity::archive::Archive;
use arsip_entity::handover::{CreateHandover, HandoverProposal, HandoverStatus};

use crate::context::RequestContext;
use crate::handover::decision::{dedupe, plan_decision, DecideHandoverInput};

/// Payload for submitting a new handover proposal.
#[derive(Debug, Clone)]
pub struct CreateHandoverInput {
    pub surrendering_party: String,
    pub receiving_party: String,
    /// Defaults to today when omitted.
    pub proposal_date: Option<NaiveDate>,
    pub archive_ids: Vec<Uuid>,
}

/// A proposal together with the archives attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct HandoverWithArchives {
    pub proposal: HandoverProposal,
    pub archives: Vec<Archive>,
}

/// Outcome of a decision: at most one approved and one rejected proposal.
///
/// Whole-proposal decisions fill exactly one side; a split fills both.
#[derive(Debug, Clone, Serialize)]
pub struct HandoverDecisionView {
    pub approved: Option<HandoverWithArchives>,
    pub rejected: Option<HandoverWithArchives>,
}

/// Read-only answer to "can this archive be loaned or handed over?".
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub archive_id: Uuid,
    pub available: bool,
    pub reason: Option<String>,
}

impl AvailabilityReport {
    fn blocked(archive_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            archive_id,
            available: false,
            reason: Some(reason.into()),
        }
    }
}

/// Manages serah terima proposals and their decision state machine.
#[derive(Clone)]
pub struct HandoverService {
    handover_repo: Arc<HandoverRepository>,
    archive_repo: Arc<ArchiveRepository>,
    loan_repo: Arc<LoanRepository>,
}

impl HandoverService {
    pub fn new(
        handover_repo: Arc<HandoverRepository>,
        archive_repo: Arc<ArchiveRepository>,
        loan_repo: Arc<LoanRepository>,
    ) -> Self {
        Self {
            handover_repo,
            archive_repo,
            loan_repo,
        }
    }

    /// Submits a new proposal. Every listed archive must pass the
    /// availability gate; one failing archive fails the whole call.
    pub async fn create_proposal(
        &self,
        ctx: &RequestContext,
        input: CreateHandoverInput,
    ) -> AppResult<HandoverWithArchives> {
        let surrendering_party = required(&input.surrendering_party, "Surrendering party")?;
        let receiving_party = required(&input.receiving_party, "Receiving party")?;

        let archive_ids = dedupe(&input.archive_ids);
        if archive_ids.is_empty() {
            return Err(AppError::validation(
                "A handover proposal must include at least one archive",
            ));
        }

        for &archive_id in &archive_ids {
            self.ensure_transferable(ctx, archive_id).await?;
        }

        let data = CreateHandover {
            surrendering_party,
            receiving_party,
            proposal_date: input.proposal_date.unwrap_or_else(today),
            created_by: ctx.user_id,
        };
        let proposal = self
            .handover_repo
            .create_with_archives(&data, &archive_ids)
            .await?;

        info!(
            proposal_id = %proposal.id,
            user_id = %ctx.user_id,
            archives = archive_ids.len(),
            "Handover proposal created"
        );
        self.hydrate(proposal).await
    }

    pub async fn get_proposal(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<HandoverWithArchives> {
        let proposal = self.find_proposal(id).await?;
        ctx.require_access(proposal.created_by, "view this handover proposal")?;
        self.hydrate(proposal).await
    }

    /// Admins see every proposal; other users only their own submissions.
    pub async fn list_proposals(
        &self,
        ctx: &RequestContext,
        status: Option<HandoverStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HandoverProposal>> {
        let created_by = if ctx.is_admin() {
            None
        } else {
            Some(ctx.user_id)
        };
        self.handover_repo.find_page(created_by, status, page).await
    }

    /// Applies a decision to a pending proposal. Admin only.
    ///
    /// The payload must cover every attached archive. Whole-proposal
    /// decisions mutate the row in place; a mixed payload splits the
    /// proposal in one transaction. A proposal already decided by a
    /// concurrent request fails with `Conflict`.
    pub async fn process(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: DecideHandoverInput,
    ) -> AppResult<HandoverDecisionView> {
        ctx.require_admin("decide handover proposals")?;

        let proposal = self.find_proposal(id).await?;
        if proposal.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Handover proposal {id} has already been decided ({})",
                proposal.status
            )));
        }

        let archive_ids = self.handover_repo.find_archive_ids(id).await?;
        let decision = plan_decision(&archive_ids, input)?;

        // Early duplicate check for a friendly error; the unique index
        // remains the authoritative guard inside the transaction.
        if let Some(record_number) = decision.record_number() {
            if self
                .handover_repo
                .record_number_exists(record_number, Some(id))
                .await?
            {
                return Err(AppError::precondition(format!(
                    "Handover record number '{record_number}' is already in use"
                )));
            }
        }

        let outcome = self.handover_repo.apply_decision(id, &decision).await?;

        let approved = match outcome.approved {
            Some(p) => Some(self.hydrate(p).await?),
            None => None,
        };
        let rejected = match outcome.rejected {
            Some(p) => Some(self.hydrate(p).await?),
            None => None,
        };

        info!(
            proposal_id = %id,
            admin_id = %ctx.user_id,
            approved = approved.is_some(),
            rejected = rejected.is_some(),
            "Handover proposal decided"
        );
        Ok(HandoverDecisionView { approved, rejected })
    }

    /// Approves every archive in the proposal.
    pub async fn approve_all(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        record_number: String,
        handover_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> AppResult<HandoverDecisionView> {
        let approved_ids = self.handover_repo.find_archive_ids(id).await?;
        let input = DecideHandoverInput {
            approved_ids,
            record_number: Some(record_number),
            handover_date: Some(handover_date.unwrap_or_else(today)),
            notes,
            ..Default::default()
        };
        self.process(ctx, id, input).await
    }

    /// Rejects every archive in the proposal.
    pub async fn reject_all(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        rejection_reason: String,
    ) -> AppResult<HandoverDecisionView> {
        let rejected_ids = self.handover_repo.find_archive_ids(id).await?;
        let input = DecideHandoverInput {
            rejected_ids,
            rejection_reason: Some(rejection_reason),
            ..Default::default()
        };
        self.process(ctx, id, input).await
    }

    /// Reports whether an archive can currently be loaned or handed over,
    /// and if not, why. Never writes.
    pub async fn check_availability(
        &self,
        ctx: &RequestContext,
        archive_id: Uuid,
    ) -> AppResult<AvailabilityReport> {
        let Some(archive) = self.archive_repo.find_by_id(archive_id).await? else {
            return Ok(AvailabilityReport::blocked(archive_id, "Archive not found"));
        };
        if !ctx.can_access(archive.owner_id) {
            return Ok(AvailabilityReport::blocked(
                archive_id,
                "You do not have access to this archive",
            ));
        }

        if let Some(loan) = self.loan_repo.find_active_by_archive(archive_id).await? {
            return Ok(AvailabilityReport::blocked(
                archive_id,
                format!("On loan to {} until {}", loan.borrower_name, loan.due_date),
            ));
        }

        if let Some(proposal) = self
            .handover_repo
            .find_blocking_for_archive(archive_id)
            .await?
        {
            let reason = match (proposal.status, &proposal.record_number) {
                (HandoverStatus::Approved, Some(record_number)) => format!(
                    "Handed over under record number {record_number} on {}",
                    proposal
                        .handover_date
                        .unwrap_or(proposal.proposal_date)
                ),
                (HandoverStatus::Approved, None) => {
                    format!("Included in approved handover proposal {}", proposal.id)
                }
                _ => format!(
                    "Included in a pending handover proposal dated {}",
                    proposal.proposal_date
                ),
            };
            return Ok(AvailabilityReport::blocked(archive_id, reason));
        }

        let assessment = archive.assess(today());
        if assessment.should_dispose {
            return Ok(AvailabilityReport::blocked(
                archive_id,
                "Retention period has expired; the archive is eligible for disposal",
            ));
        }
        if assessment.is_inactive_phase {
            return Ok(AvailabilityReport::blocked(
                archive_id,
                "Archive is in its inactive retention phase",
            ));
        }

        Ok(AvailabilityReport {
            archive_id,
            available: true,
            reason: None,
        })
    }

    /// One archive failing any gate fails proposal creation entirely.
    async fn ensure_transferable(&self, ctx: &RequestContext, archive_id: Uuid) -> AppResult<()> {
        let archive = self
            .archive_repo
            .find_by_id(archive_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {archive_id} not found")))?;
        ctx.require_access(archive.owner_id, "propose this archive for handover")?;

        if let Some(loan) = self.loan_repo.find_active_by_archive(archive_id).await? {
            return Err(AppError::precondition(format!(
                "Archive '{}' is on loan to {} until {}",
                archive.title, loan.borrower_name, loan.due_date
            )));
        }
        if let Some(blocking) = self
            .handover_repo
            .find_blocking_for_archive(archive_id)
            .await?
        {
            return Err(AppError::precondition(format!(
                "Archive '{}' already belongs to handover proposal {} ({})",
                archive.title, blocking.id, blocking.status
            )));
        }
        Ok(())
    }

    async fn find_proposal(&self, id: Uuid) -> AppResult<HandoverProposal> {
        self.handover_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Handover proposal {id} not found")))
    }

    async fn hydrate(&self, proposal: HandoverProposal) -> AppResult<HandoverWithArchives> {
        let archives = self.handover_repo.find_archives(proposal.id).await?;
        Ok(HandoverWithArchives { proposal, archives })
    }
}

fn required(value: &str, label: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(trimmed.to_owned())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
