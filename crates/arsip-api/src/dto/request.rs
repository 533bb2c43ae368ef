//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role name: "admin" or "user".
    pub role: String,
}

/// Change role request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role name.
    pub role: String,
}

/// Register a new archive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateArchiveRequest {
    /// Archive title.
    #[validate(length(min = 1, max = 500, message = "Title is required"))]
    pub title: String,
    /// Date of the underlying document; drives retention.
    pub document_date: Option<NaiveDate>,
    /// Classification code, e.g. `KU.01.03`.
    pub classification_code: Option<String>,
    /// Date the record entered the archive (defaults to today).
    pub entry_date: Option<NaiveDate>,
    /// Retention override in years when no rule applies.
    #[validate(range(min = 1, message = "Retention must be at least one year"))]
    pub retention_years: Option<i32>,
}

/// Partial archive update; absent fields stay unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateArchiveRequest {
    pub title: Option<String>,
    pub document_date: Option<NaiveDate>,
    /// An empty string clears the code.
    pub classification_code: Option<String>,
    #[validate(range(min = 1, message = "Retention must be at least one year"))]
    pub retention_years: Option<i32>,
}

/// Bulk archive intake.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportArchivesRequest {
    /// Rows to register; validated independently.
    #[validate(length(min = 1, message = "Import payload contains no rows"))]
    pub archives: Vec<CreateArchiveRequest>,
}

/// Create loan request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLoanRequest {
    /// Archive to lend out.
    pub archive_id: Uuid,
    /// Loan letter (surat) number.
    #[validate(length(min = 1, message = "Surat number is required"))]
    pub surat_number: String,
    /// Borrower name.
    #[validate(length(min = 1, message = "Borrower name is required"))]
    pub borrower_name: String,
    /// Purpose of the loan.
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
    /// Defaults to today.
    pub borrow_date: Option<NaiveDate>,
    /// Defaults to borrow date plus seven days.
    pub due_date: Option<NaiveDate>,
}

/// Return loan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnLoanRequest {
    /// Defaults to today.
    pub return_date: Option<NaiveDate>,
}

/// Create handover proposal request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHandoverRequest {
    /// Unit surrendering the archives.
    #[validate(length(min = 1, message = "Surrendering party is required"))]
    pub surrendering_party: String,
    /// Unit receiving the archives.
    #[validate(length(min = 1, message = "Receiving party is required"))]
    pub receiving_party: String,
    /// Defaults to today.
    pub proposal_date: Option<NaiveDate>,
    /// Archives included in this proposal.
    #[validate(length(min = 1, message = "A handover proposal must include at least one archive"))]
    pub archive_ids: Vec<Uuid>,
}

/// General decision payload; may approve, reject, or split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessHandoverRequest {
    /// Archives to hand over.
    #[serde(default)]
    pub approved_ids: Vec<Uuid>,
    /// Archives to keep with the surrendering party.
    #[serde(default)]
    pub rejected_ids: Vec<Uuid>,
    /// Official handover record number (required when approving).
    pub record_number: Option<String>,
    /// Required when approving.
    pub handover_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Required when rejecting.
    pub rejection_reason: Option<String>,
}

/// Whole-proposal approval.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApproveHandoverRequest {
    #[validate(length(min = 1, message = "Record number is required"))]
    pub record_number: String,
    /// Defaults to today.
    pub handover_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Whole-proposal rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectHandoverRequest {
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub rejection_reason: String,
}
