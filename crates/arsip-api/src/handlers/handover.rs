//! Handover proposal handlers.
//!
//! Creation and listing are open to any authenticated user (scoped to
//! their own archives); decisions go through the admin-only service
//! methods. The `process` endpoint accepts a mixed approve/reject split,
//! while `approve` and `reject` are whole-proposal shorthands.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::types::PageResponse;
use arsip_entity::handover::{HandoverProposal, HandoverStatus};
use arsip_service::handover::{
    CreateHandoverInput, DecideHandoverInput, HandoverDecisionView, HandoverWithArchives,
};

use crate::dto::request::{
    ApproveHandoverRequest, CreateHandoverRequest, ProcessHandoverRequest, RejectHandoverRequest,
};
use crate::dto::response::ApiResponse;
use crate::dto::validate_payload;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Optional filters for handover listings.
#[derive(Debug, Deserialize)]
pub struct HandoverFilterParams {
    /// Proposal status filter: `PENDING`, `APPROVED`, or `REJECTED`.
    pub status: Option<String>,
}

/// GET /api/handovers
pub async fn list_handovers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<HandoverFilterParams>,
) -> Result<Json<ApiResponse<PageResponse<HandoverProposal>>>, AppError> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<HandoverStatus>)
        .transpose()?;
    let page = pagination.into_page_request();

    let result = state
        .handover_service
        .list_proposals(&auth, status, &page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/handovers
pub async fn create_handover(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateHandoverRequest>,
) -> Result<Json<ApiResponse<HandoverWithArchives>>, AppError> {
    validate_payload(&req)?;
    let input = CreateHandoverInput {
        surrendering_party: req.surrendering_party,
        receiving_party: req.receiving_party,
        proposal_date: req.proposal_date,
        archive_ids: req.archive_ids,
    };
    let result = state.handover_service.create_proposal(&auth, input).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/handovers/{id}
pub async fn get_handover(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<HandoverWithArchives>>, AppError> {
    let result = state.handover_service.get_proposal(&auth, id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/handovers/{id}/process
pub async fn process_handover(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ProcessHandoverRequest>,
) -> Result<Json<ApiResponse<HandoverDecisionView>>, AppError> {
    let input = DecideHandoverInput {
        approved_ids: req.approved_ids,
        rejected_ids: req.rejected_ids,
        record_number: req.record_number,
        handover_date: req.handover_date,
        notes: req.notes,
        rejection_reason: req.rejection_reason,
    };
    let result = state.handover_service.process(&auth, id, input).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/handovers/{id}/approve
pub async fn approve_handover(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveHandoverRequest>,
) -> Result<Json<ApiResponse<HandoverDecisionView>>, AppError> {
    validate_payload(&req)?;
    let result = state
        .handover_service
        .approve_all(&auth, id, req.record_number, req.handover_date, req.notes)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/handovers/{id}/reject
pub async fn reject_handover(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectHandoverRequest>,
) -> Result<Json<ApiResponse<HandoverDecisionView>>, AppError> {
    validate_payload(&req)?;
    let result = state
        .handover_service
        .reject_all(&auth, id, req.rejection_reason)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}
