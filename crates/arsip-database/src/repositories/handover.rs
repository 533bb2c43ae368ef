//! Handover proposal repository implementation.
//!
//! Proposal creation and decision application are transactional. A
//! decision takes `SELECT ... FOR UPDATE` on the proposal row, so when
//! two administrators decide the same proposal concurrently the second
//! transaction observes the terminal state and fails with a conflict.

use sqlx::PgPool;
use uuid::Uuid;

use arsip_core::error::{AppError, ErrorKind};
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_entity::archive::Archive;
use arsip_entity::handover::{
    CreateHandover, DecisionOutcome, HandoverDecision, HandoverProposal, HandoverStatus,
};

/// Repository for handover proposals and their archive links.
#[derive(Debug, Clone)]
pub struct HandoverRepository {
    pool: PgPool,
}

impl HandoverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a proposal by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<HandoverProposal>> {
        sqlx::query_as::<_, HandoverProposal>("SELECT * FROM handover_proposals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find handover proposal", e)
            })
    }

    /// List proposals with optional creator and status filters.
    pub async fn find_page(
        &self,
        created_by: Option<Uuid>,
        status: Option<HandoverStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HandoverProposal>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM handover_proposals \
             WHERE ($1::uuid IS NULL OR created_by = $1) \
               AND ($2::handover_status IS NULL OR status = $2)",
        )
        .bind(created_by)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count proposals", e))?;

        let proposals = sqlx::query_as::<_, HandoverProposal>(
            "SELECT * FROM handover_proposals \
             WHERE ($1::uuid IS NULL OR created_by = $1) \
               AND ($2::handover_status IS NULL OR status = $2) \
             ORDER BY created_at DESC, id LIMIT $3 OFFSET $4",
        )
        .bind(created_by)
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list proposals", e))?;

        Ok(PageResponse::new(
            proposals,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// The archives currently linked to a proposal.
    pub async fn find_archives(&self, proposal_id: Uuid) -> AppResult<Vec<Archive>> {
        sqlx::query_as::<_, Archive>(
            "SELECT a.* FROM archives a \
             JOIN handover_archives ha ON ha.archive_id = a.id \
             WHERE ha.proposal_id = $1 ORDER BY a.created_at ASC",
        )
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load proposal archives", e)
        })
    }

    /// Just the archive IDs linked to a proposal.
    pub async fn find_archive_ids(&self, proposal_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT archive_id FROM handover_archives WHERE proposal_id = $1",
        )
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load proposal archive ids", e)
        })
    }

    /// The pending or approved proposal an archive is linked to, if any.
    /// Rejected proposals do not block; the archives went back to their
    /// owner when the rejection was recorded.
    pub async fn find_blocking_for_archive(
        &self,
        archive_id: Uuid,
    ) -> AppResult<Option<HandoverProposal>> {
        sqlx::query_as::<_, HandoverProposal>(
            "SELECT p.* FROM handover_proposals p \
             JOIN handover_archives ha ON ha.proposal_id = p.id \
             WHERE ha.archive_id = $1 AND p.status IN ('pending', 'approved') \
             ORDER BY p.created_at DESC LIMIT 1",
        )
        .bind(archive_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check archive handovers", e)
        })
    }

    /// Whether a record number is already claimed by another proposal.
    pub async fn record_number_exists(
        &self,
        record_number: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM handover_proposals \
             WHERE record_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(record_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check record number", e)
        })
    }

    /// Insert a proposal and its archive links in one transaction, so a
    /// proposal can never exist without its archives.
    pub async fn create_with_archives(
        &self,
        data: &CreateHandover,
        archive_ids: &[Uuid],
    ) -> AppResult<HandoverProposal> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let proposal = sqlx::query_as::<_, HandoverProposal>(
            "INSERT INTO handover_proposals \
             (surrendering_party, receiving_party, proposal_date, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.surrendering_party)
        .bind(&data.receiving_party)
        .bind(data.proposal_date)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create handover proposal", e)
        })?;

        sqlx::query(
            "INSERT INTO handover_archives (proposal_id, archive_id) \
             SELECT $1, unnest($2::uuid[])",
        )
        .bind(proposal.id)
        .bind(archive_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to link proposal archives", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit proposal", e)
        })?;

        Ok(proposal)
    }

    /// Apply a validated decision to a pending proposal.
    ///
    /// The whole decision is one transaction:
    /// 1. Lock the proposal row and re-check that it is still pending.
    /// 2. Approve-all / reject-all: update the row in place.
    /// 3. Split: insert a new approved proposal, move the approved
    ///    archive links onto it, then reject the original in place.
    ///
    /// After a split every archive of the original proposal is linked to
    /// exactly one of the two proposals.
    pub async fn apply_decision(
        &self,
        proposal_id: Uuid,
        decision: &HandoverDecision,
    ) -> AppResult<DecisionOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let current = sqlx::query_as::<_, HandoverProposal>(
            "SELECT * FROM handover_proposals WHERE id = $1 FOR UPDATE",
        )
        .bind(proposal_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to lock handover proposal", e)
        })?
        .ok_or_else(|| {
            AppError::not_found(format!("Handover proposal {proposal_id} not found"))
        })?;

        if current.status != HandoverStatus::Pending {
            return Err(AppError::conflict(format!(
                "Handover proposal {} has already been decided ({})",
                proposal_id, current.status
            )));
        }

        let outcome = match decision {
            HandoverDecision::ApproveAll {
                record_number,
                handover_date,
                notes,
            } => {
                let approved = sqlx::query_as::<_, HandoverProposal>(
                    "UPDATE handover_proposals SET \
                     status = 'approved', record_number = $2, handover_date = $3, notes = $4, \
                     updated_at = NOW() WHERE id = $1 RETURNING *",
                )
                .bind(proposal_id)
                .bind(record_number)
                .bind(handover_date)
                .bind(notes)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_record_number_violation(e, record_number))?;

                DecisionOutcome {
                    approved: Some(approved),
                    rejected: None,
                }
            }

            HandoverDecision::RejectAll { rejection_reason } => {
                let rejected = sqlx::query_as::<_, HandoverProposal>(
                    "UPDATE handover_proposals SET \
                     status = 'rejected', rejection_reason = $2, updated_at = NOW() \
                     WHERE id = $1 RETURNING *",
                )
                .bind(proposal_id)
                .bind(rejection_reason)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to reject proposal", e)
                })?;

                DecisionOutcome {
                    approved: None,
                    rejected: Some(rejected),
                }
            }

            HandoverDecision::Split {
                approved_ids,
                record_number,
                handover_date,
                notes,
                rejection_reason,
                ..
            } => {
                // The approved subset moves to a fresh proposal that is
                // born approved, keeping the original's parties and date.
                let approved = sqlx::query_as::<_, HandoverProposal>(
                    "INSERT INTO handover_proposals \
                     (surrendering_party, receiving_party, proposal_date, status, \
                      record_number, handover_date, notes, created_by) \
                     VALUES ($1, $2, $3, 'approved', $4, $5, $6, $7) RETURNING *",
                )
                .bind(&current.surrendering_party)
                .bind(&current.receiving_party)
                .bind(current.proposal_date)
                .bind(record_number)
                .bind(handover_date)
                .bind(notes)
                .bind(current.created_by)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_record_number_violation(e, record_number))?;

                let moved = sqlx::query(
                    "UPDATE handover_archives SET proposal_id = $1 \
                     WHERE proposal_id = $2 AND archive_id = ANY($3)",
                )
                .bind(approved.id)
                .bind(proposal_id)
                .bind(approved_ids)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to move archive links", e)
                })?
                .rows_affected();

                if moved as usize != approved_ids.len() {
                    return Err(AppError::internal(format!(
                        "Handover split moved {moved} of {} archive links",
                        approved_ids.len()
                    )));
                }

                let rejected = sqlx::query_as::<_, HandoverProposal>(
                    "UPDATE handover_proposals SET \
                     status = 'rejected', rejection_reason = $2, updated_at = NOW() \
                     WHERE id = $1 RETURNING *",
                )
                .bind(proposal_id)
                .bind(rejection_reason)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to reject remainder", e)
                })?;

                DecisionOutcome {
                    approved: Some(approved),
                    rejected: Some(rejected),
                }
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit decision", e)
        })?;

        Ok(outcome)
    }
}

fn map_record_number_violation(e: sqlx::Error, record_number: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("handover_proposals_record_number_key") {
            return AppError::precondition(format!(
                "Record number '{record_number}' is already used by another proposal"
            ));
        }
    }
    AppError::with_source(ErrorKind::Database, "Failed to approve proposal", e)
}
