//! Bulk retention recalculation handlers.

use axum::Json;
use axum::extract::State;

use arsip_core::error::AppError;
use arsip_service::archive::RecalculationSummary;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/archives/recalculate
pub async fn recalculate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RecalculationSummary>>, AppError> {
    require_admin(&auth)?;
    let summary = state.recalculation_service.recalculate(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/admin/archives/recalculate/preview
pub async fn preview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RecalculationSummary>>, AppError> {
    require_admin(&auth)?;
    let summary = state.recalculation_service.preview(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
