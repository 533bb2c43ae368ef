//! Archive repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use arsip_core::error::{AppError, ErrorKind};
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_entity::archive::{Archive, ArchiveStatus, CreateArchive};

/// Repository for archive rows.
#[derive(Debug, Clone)]
pub struct ArchiveRepository {
    pool: PgPool,
}

impl ArchiveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an archive by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Archive>> {
        sqlx::query_as::<_, Archive>("SELECT * FROM archives WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find archive", e))
    }

    /// Fetch a set of archives by ID. Missing IDs are simply absent from
    /// the result.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Archive>> {
        sqlx::query_as::<_, Archive>(
            "SELECT * FROM archives WHERE id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load archives", e))
    }

    /// List archives with optional owner and status filters.
    pub async fn find_page(
        &self,
        owner_id: Option<Uuid>,
        status: Option<ArchiveStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Archive>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM archives \
             WHERE ($1::uuid IS NULL OR owner_id = $1) \
               AND ($2::archive_status IS NULL OR status = $2)",
        )
        .bind(owner_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count archives", e))?;

        let archives = sqlx::query_as::<_, Archive>(
            "SELECT * FROM archives \
             WHERE ($1::uuid IS NULL OR owner_id = $1) \
               AND ($2::archive_status IS NULL OR status = $2) \
             ORDER BY created_at DESC, id LIMIT $3 OFFSET $4",
        )
        .bind(owner_id)
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list archives", e))?;

        Ok(PageResponse::new(
            archives,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Keyset scan over all archives in ID order, for bulk recalculation.
    /// Pass the last ID of the previous batch to get the next one.
    pub async fn find_batch_after(
        &self,
        after_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<Archive>> {
        sqlx::query_as::<_, Archive>(
            "SELECT * FROM archives WHERE ($1::uuid IS NULL OR id > $1) ORDER BY id ASC LIMIT $2",
        )
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to scan archives", e))
    }

    /// Insert a new archive.
    pub async fn create(&self, data: &CreateArchive) -> AppResult<Archive> {
        sqlx::query_as::<_, Archive>(
            "INSERT INTO archives \
             (title, document_date, classification_code, entry_date, retention_years, status, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.title)
        .bind(data.document_date)
        .bind(&data.classification_code)
        .bind(data.entry_date)
        .bind(data.retention_years)
        .bind(data.status)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create archive", e))
    }

    /// Persist an updated archive row.
    pub async fn update(&self, archive: &Archive) -> AppResult<Archive> {
        sqlx::query_as::<_, Archive>(
            "UPDATE archives SET \
             title = $2, document_date = $3, classification_code = $4, entry_date = $5, \
             retention_years = $6, status = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(archive.id)
        .bind(&archive.title)
        .bind(archive.document_date)
        .bind(&archive.classification_code)
        .bind(archive.entry_date)
        .bind(archive.retention_years)
        .bind(archive.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update archive", e))
    }

    /// Refresh only the cached status. Returns whether a row changed.
    pub async fn update_status(&self, id: Uuid, status: ArchiveStatus) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE archives SET status = $2, updated_at = NOW() WHERE id = $1 AND status <> $2",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update archive status", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an archive. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM archives WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete archive", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
