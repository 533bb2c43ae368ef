//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::types::PageResponse;
use arsip_entity::user::{User, UserRole};
use arsip_service::user::CreateUserInput;

use crate::dto::request::{ChangeRoleRequest, CreateUserRequest};
use crate::dto::response::ApiResponse;
use crate::dto::validate_payload;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, AppError> {
    require_admin(&auth)?;
    let page = pagination.into_page_request();
    let result = state.admin_user_service.list_users(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    require_admin(&auth)?;
    validate_payload(&req)?;
    let role = req.role.parse::<UserRole>()?;
    let user = state
        .admin_user_service
        .create_user(
            &auth,
            CreateUserInput {
                username: req.username,
                password: req.password,
                display_name: req.display_name,
                role,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    require_admin(&auth)?;
    let user = state.admin_user_service.get_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/admin/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    require_admin(&auth)?;
    let role = req.role.parse::<UserRole>()?;
    let user = state.admin_user_service.change_role(&auth, id, role).await?;
    Ok(Json(ApiResponse::ok(user)))
}
