//! Bulk status recalculation.
//!
//! Stored statuses age out of date as documents cross retention
//! boundaries. This service sweeps every archive, re-derives its status,
//! and persists the ones that changed.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_database::repositories::ArchiveRepository;
use arsip_entity::archive::ArchiveStatus;

use crate::context::RequestContext;

const RECALC_BATCH_SIZE: i64 = 500;

/// Sweeps the archive table and refreshes cached statuses.
pub struct RecalculationService {
    archive_repo: Arc<ArchiveRepository>,
    // Held for the duration of a persisting run so only one runs at a
    // time. try_lock instead of lock: a second caller gets an immediate
    // conflict rather than queueing up behind the sweep.
    running: Mutex<()>,
}

/// What one sweep saw and did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecalculationSummary {
    /// Rows examined.
    pub scanned: u64,
    /// Rows whose derived status differed from the stored one.
    pub updated: u64,
    /// Rows already up to date.
    pub unchanged: u64,
    /// Derived status distribution over all scanned rows.
    pub distribution: StatusTally,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusTally {
    pub active: u64,
    pub inactive: u64,
    pub dispose_eligible: u64,
}

impl StatusTally {
    fn record(&mut self, status: ArchiveStatus) {
        match status {
            ArchiveStatus::Active => self.active += 1,
            ArchiveStatus::Inactive => self.inactive += 1,
            ArchiveStatus::DisposeEligible => self.dispose_eligible += 1,
        }
    }
}

impl RecalculationService {
    pub fn new(archive_repo: Arc<ArchiveRepository>) -> Self {
        Self {
            archive_repo,
            running: Mutex::new(()),
        }
    }

    /// Recompute and persist the status of every archive.
    pub async fn recalculate(&self, ctx: &RequestContext) -> AppResult<RecalculationSummary> {
        ctx.require_admin("recalculate archive statuses")?;

        let _running = self
            .running
            .try_lock()
            .map_err(|_| AppError::conflict("A recalculation run is already in progress"))?;

        let summary = self.sweep(true).await?;
        info!(
            user_id = %ctx.user_id,
            scanned = summary.scanned,
            updated = summary.updated,
            "Archive recalculation finished"
        );
        Ok(summary)
    }

    /// Dry run: report what a recalculation would change without writing.
    pub async fn preview(&self, ctx: &RequestContext) -> AppResult<RecalculationSummary> {
        ctx.require_admin("preview archive recalculation")?;
        self.sweep(false).await
    }

    async fn sweep(&self, persist: bool) -> AppResult<RecalculationSummary> {
        let today = Utc::now().date_naive();
        let mut summary = RecalculationSummary::default();
        let mut cursor: Option<Uuid> = None;

        loop {
            let batch = self
                .archive_repo
                .find_batch_after(cursor, RECALC_BATCH_SIZE)
                .await?;
            let Some(last) = batch.last() else {
                break;
            };
            cursor = Some(last.id);

            for archive in &batch {
                let assessment = archive.assess(today);
                summary.scanned += 1;
                summary.distribution.record(assessment.status);

                if assessment.status == archive.status {
                    summary.unchanged += 1;
                } else {
                    if persist {
                        self.archive_repo
                            .update_status(archive.id, assessment.status)
                            .await?;
                    }
                    summary.updated += 1;
                }
            }
        }

        Ok(summary)
    }
}
