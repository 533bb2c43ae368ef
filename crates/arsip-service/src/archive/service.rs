//! Archive registration, lookup, update, and deletion.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_database::repositories::{ArchiveRepository, HandoverRepository, LoanRepository};
use arsip_entity::archive::retention::DEFAULT_ACTIVE_YEARS;
use arsip_entity::archive::{retention, Archive, ArchiveStatus, CreateArchive, RetentionAssessment};

use crate::context::RequestContext;

/// Core archive service.
///
/// Status is derived by the retention engine and cached on the row: it is
/// computed at intake, recomputed and persisted on every update, and
/// recomputed for display on every read, so a stale cache can never leak
/// into a response.
#[derive(Clone)]
pub struct ArchiveService {
    archive_repo: Arc<ArchiveRepository>,
    loan_repo: Arc<LoanRepository>,
    handover_repo: Arc<HandoverRepository>,
}

/// Input for registering one archive.
#[derive(Debug, Clone)]
pub struct CreateArchiveInput {
    pub title: String,
    pub document_date: Option<NaiveDate>,
    pub classification_code: Option<String>,
    /// Defaults to today.
    pub entry_date: Option<NaiveDate>,
    /// Fallback active retention when the code matches no schedule row.
    pub retention_years: Option<i32>,
}

/// Partial update. `None` fields are left unchanged; an empty
/// classification code clears the stored one.
#[derive(Debug, Clone, Default)]
pub struct UpdateArchiveInput {
    pub title: Option<String>,
    pub document_date: Option<NaiveDate>,
    pub classification_code: Option<String>,
    pub retention_years: Option<i32>,
}

/// An archive together with its current retention assessment.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveWithAssessment {
    pub archive: Archive,
    pub assessment: RetentionAssessment,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
}

/// One failed row of a bulk import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportError {
    /// Zero-based position of the row in the submitted payload.
    pub index: usize,
    pub message: String,
}

impl ArchiveService {
    pub fn new(
        archive_repo: Arc<ArchiveRepository>,
        loan_repo: Arc<LoanRepository>,
        handover_repo: Arc<HandoverRepository>,
    ) -> Self {
        Self {
            archive_repo,
            loan_repo,
            handover_repo,
        }
    }

    /// Register one archive. The retention engine runs at intake so the
    /// row is born with the right status.
    pub async fn create_archive(
        &self,
        ctx: &RequestContext,
        input: CreateArchiveInput,
    ) -> AppResult<ArchiveWithAssessment> {
        let data = validate_new_archive(ctx, input)?;
        let archive = self.archive_repo.create(&data).await?;

        info!(
            user_id = %ctx.user_id,
            archive_id = %archive.id,
            status = %archive.status,
            "Archive registered"
        );
        Ok(with_assessment(archive))
    }

    /// Register many archives in one request. Rows are validated and
    /// inserted independently; one bad row fails alone, not the batch.
    pub async fn import_archives(
        &self,
        ctx: &RequestContext,
        inputs: Vec<CreateArchiveInput>,
    ) -> AppResult<ImportSummary> {
        if inputs.is_empty() {
            return Err(AppError::validation("Import payload contains no rows"));
        }

        let mut summary = ImportSummary::default();
        for (index, input) in inputs.into_iter().enumerate() {
            let outcome = match validate_new_archive(ctx, input) {
                Ok(data) => self.archive_repo.create(&data).await.map(|_| ()),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    summary.failed += 1;
                    summary.errors.push(ImportError {
                        index,
                        message: e.message,
                    });
                }
            }
        }

        info!(
            user_id = %ctx.user_id,
            imported = summary.imported,
            failed = summary.failed,
            "Archive import finished"
        );
        Ok(summary)
    }

    pub async fn get_archive(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<ArchiveWithAssessment> {
        let archive = self
            .archive_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {id} not found")))?;
        ctx.require_access(archive.owner_id, "view this archive")?;

        Ok(with_assessment(archive))
    }

    pub async fn list_archives(
        &self,
        ctx: &RequestContext,
        status: Option<ArchiveStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ArchiveWithAssessment>> {
        let owner_filter = if ctx.is_admin() {
            None
        } else {
            Some(ctx.user_id)
        };

        let archives = self.archive_repo.find_page(owner_filter, status, page).await?;
        Ok(archives.map(with_assessment))
    }

    /// Update archive fields and refresh the cached status, so the stored
    /// row always agrees with what the engine would derive.
    pub async fn update_archive(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateArchiveInput,
    ) -> AppResult<ArchiveWithAssessment> {
        let mut archive = self
            .archive_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {id} not found")))?;
        ctx.require_access(archive.owner_id, "update this archive")?;

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::validation("Archive title must not be empty"));
            }
            archive.title = title;
        }
        if let Some(date) = input.document_date {
            archive.document_date = Some(date);
        }
        if let Some(code) = input.classification_code {
            archive.classification_code = normalize_code(Some(code));
        }
        if let Some(years) = input.retention_years {
            if years < 1 {
                return Err(AppError::validation("Retention years must be at least 1"));
            }
            archive.retention_years = years;
        }

        archive.status = archive.assess(Utc::now().date_naive()).status;
        let updated = self.archive_repo.update(&archive).await?;

        info!(
            user_id = %ctx.user_id,
            archive_id = %updated.id,
            status = %updated.status,
            "Archive updated"
        );
        Ok(with_assessment(updated))
    }

    /// Delete an archive that is not on loan and not part of a live
    /// handover proposal.
    pub async fn delete_archive(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let archive = self
            .archive_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {id} not found")))?;
        ctx.require_access(archive.owner_id, "delete this archive")?;

        if let Some(loan) = self.loan_repo.find_active_by_archive(id).await? {
            return Err(AppError::precondition(format!(
                "Archive '{}' is on loan to {} until {}",
                archive.title, loan.borrower_name, loan.due_date
            )));
        }
        if let Some(proposal) = self.handover_repo.find_blocking_for_archive(id).await? {
            return Err(AppError::precondition(format!(
                "Archive '{}' belongs to handover proposal {} ({})",
                archive.title, proposal.id, proposal.status
            )));
        }

        if !self.archive_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Archive {id} not found")));
        }

        info!(user_id = %ctx.user_id, archive_id = %id, "Archive deleted");
        Ok(())
    }
}

fn validate_new_archive(
    ctx: &RequestContext,
    input: CreateArchiveInput,
) -> AppResult<CreateArchive> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::validation("Archive title must not be empty"));
    }

    let retention_years = input.retention_years.unwrap_or(DEFAULT_ACTIVE_YEARS as i32);
    if retention_years < 1 {
        return Err(AppError::validation("Retention years must be at least 1"));
    }

    let today = Utc::now().date_naive();
    let classification_code = normalize_code(input.classification_code);
    let assessment = retention::assess_with_default(
        input.document_date,
        classification_code.as_deref(),
        i64::from(retention_years),
        today,
    );

    Ok(CreateArchive {
        title,
        document_date: input.document_date,
        classification_code,
        entry_date: input.entry_date.unwrap_or(today),
        retention_years,
        status: assessment.status,
        owner_id: ctx.user_id,
    })
}

fn normalize_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

fn with_assessment(archive: Archive) -> ArchiveWithAssessment {
    let assessment = archive.assess(Utc::now().date_naive());
    ArchiveWithAssessment {
        archive,
        assessment,
    }
}
