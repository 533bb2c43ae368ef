//! Loan repository implementation.
//!
//! Active-loan uniqueness is enforced by partial unique indexes on
//! `loans`; the INSERT maps those violations to precondition errors so a
//! race between two checkouts of the same record resolves cleanly.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use arsip_core::error::{AppError, ErrorKind};
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_entity::loan::{CreateLoan, Loan};

/// Repository for loan rows.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    pool: PgPool,
}

impl LoanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a loan by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Loan>> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find loan", e))
    }

    /// The active (unreturned) loan for an archive, if any.
    pub async fn find_active_by_archive(&self, archive_id: Uuid) -> AppResult<Option<Loan>> {
        sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE archive_id = $1 AND return_date IS NULL",
        )
        .bind(archive_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find active loan", e))
    }

    /// The active loan registered under a surat number, if any.
    pub async fn find_active_by_surat(&self, surat_number: &str) -> AppResult<Option<Loan>> {
        sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE surat_number = $1 AND return_date IS NULL",
        )
        .bind(surat_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find loan by surat number", e)
        })
    }

    /// Whether the archive is currently lent out.
    pub async fn has_active_loan(&self, archive_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM loans WHERE archive_id = $1 AND return_date IS NULL)",
        )
        .bind(archive_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check active loan", e))
    }

    /// List loans, optionally restricted to archives of one owner.
    pub async fn find_page(
        &self,
        owner_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Loan>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans l \
             JOIN archives a ON a.id = l.archive_id \
             WHERE ($1::uuid IS NULL OR a.owner_id = $1)",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count loans", e))?;

        let loans = sqlx::query_as::<_, Loan>(
            "SELECT l.* FROM loans l \
             JOIN archives a ON a.id = l.archive_id \
             WHERE ($1::uuid IS NULL OR a.owner_id = $1) \
             ORDER BY l.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list loans", e))?;

        Ok(PageResponse::new(
            loans,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new loan.
    pub async fn create(&self, data: &CreateLoan) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "INSERT INTO loans \
             (archive_id, surat_number, borrower_name, purpose, borrow_date, due_date, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.archive_id)
        .bind(&data.surat_number)
        .bind(&data.borrower_name)
        .bind(&data.purpose)
        .bind(data.borrow_date)
        .bind(data.due_date)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("loans_active_surat_number_idx") {
                    return AppError::precondition(format!(
                        "Surat number '{}' already belongs to an active loan",
                        data.surat_number
                    ));
                }
                if db_err.constraint() == Some("loans_active_archive_idx") {
                    return AppError::precondition(
                        "Archive is already lent out under another active loan",
                    );
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to create loan", e)
        })
    }

    /// Close a loan by setting its return date.
    pub async fn mark_returned(&self, id: Uuid, return_date: NaiveDate) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "UPDATE loans SET return_date = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(return_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to close loan", e))
    }
}
