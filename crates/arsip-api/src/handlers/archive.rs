//! Archive CRUD, retention, availability, and bulk intake handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::types::PageResponse;
use arsip_entity::archive::ArchiveStatus;
use arsip_entity::RetentionAssessment;
use arsip_service::archive::{ArchiveWithAssessment, CreateArchiveInput, ImportSummary, UpdateArchiveInput};
use arsip_service::handover::AvailabilityReport;

use crate::dto::request::{CreateArchiveRequest, ImportArchivesRequest, UpdateArchiveRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_payload;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Optional filters for archive listings.
#[derive(Debug, Deserialize)]
pub struct ArchiveFilterParams {
    /// Stored status filter, e.g. `ACTIVE` or `DISPOSE_ELIGIBLE`.
    pub status: Option<String>,
}

/// GET /api/archives
pub async fn list_archives(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<ArchiveFilterParams>,
) -> Result<Json<ApiResponse<PageResponse<ArchiveWithAssessment>>>, AppError> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<ArchiveStatus>)
        .transpose()?;
    let page = pagination.into_page_request();

    let result = state.archive_service.list_archives(&auth, status, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/archives
pub async fn create_archive(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateArchiveRequest>,
) -> Result<Json<ApiResponse<ArchiveWithAssessment>>, AppError> {
    validate_payload(&req)?;
    let result = state
        .archive_service
        .create_archive(&auth, into_input(req))
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/archives/{id}
pub async fn get_archive(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArchiveWithAssessment>>, AppError> {
    let result = state.archive_service.get_archive(&auth, id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/archives/{id}/retention
pub async fn get_retention(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RetentionAssessment>>, AppError> {
    let result = state.archive_service.get_archive(&auth, id).await?;
    Ok(Json(ApiResponse::ok(result.assessment)))
}

/// GET /api/archives/{id}/availability
pub async fn check_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AvailabilityReport>>, AppError> {
    let report = state.handover_service.check_availability(&auth, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// PUT /api/archives/{id}
pub async fn update_archive(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArchiveRequest>,
) -> Result<Json<ApiResponse<ArchiveWithAssessment>>, AppError> {
    validate_payload(&req)?;
    let input = UpdateArchiveInput {
        title: req.title,
        document_date: req.document_date,
        classification_code: req.classification_code,
        retention_years: req.retention_years,
    };
    let result = state.archive_service.update_archive(&auth, id, input).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// DELETE /api/archives/{id}
pub async fn delete_archive(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.archive_service.delete_archive(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Archive deleted".to_string(),
    })))
}

/// POST /api/archives/import
pub async fn import_archives(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ImportArchivesRequest>,
) -> Result<Json<ApiResponse<ImportSummary>>, AppError> {
    validate_payload(&req)?;
    let rows = req.archives.into_iter().map(into_input).collect();
    let summary = state.archive_service.import_archives(&auth, rows).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

fn into_input(req: CreateArchiveRequest) -> CreateArchiveInput {
    CreateArchiveInput {
        title: req.title,
        document_date: req.document_date,
        classification_code: req.classification_code,
        entry_date: req.entry_date,
        retention_years: req.retention_years,
    }
}
