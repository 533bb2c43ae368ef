//! Loan registration and return handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::types::PageResponse;
use arsip_entity::loan::Loan;
use arsip_service::loan::{CreateLoanInput, LoanView};

use crate::dto::request::{CreateLoanRequest, ReturnLoanRequest};
use crate::dto::response::ApiResponse;
use crate::dto::validate_payload;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/loans
pub async fn list_loans(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<LoanView>>>, AppError> {
    let page = pagination.into_page_request();
    let result = state.loan_service.list_loans(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/loans
pub async fn create_loan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateLoanRequest>,
) -> Result<Json<ApiResponse<Loan>>, AppError> {
    validate_payload(&req)?;
    let input = CreateLoanInput {
        archive_id: req.archive_id,
        surat_number: req.surat_number,
        borrower_name: req.borrower_name,
        purpose: req.purpose,
        borrow_date: req.borrow_date,
        due_date: req.due_date,
    };
    let loan = state.loan_service.create_loan(&auth, input).await?;
    Ok(Json(ApiResponse::ok(loan)))
}

/// GET /api/loans/{id}
pub async fn get_loan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LoanView>>, AppError> {
    let result = state.loan_service.get_loan(&auth, id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// PUT /api/loans/{id}/return
pub async fn return_loan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReturnLoanRequest>,
) -> Result<Json<ApiResponse<Loan>>, AppError> {
    let loan = state
        .loan_service
        .return_loan(&auth, id, req.return_date)
        .await?;
    Ok(Json(ApiResponse::ok(loan)))
}
