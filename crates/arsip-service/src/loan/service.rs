//! Loan registration and returns.
//!
//! The availability gate: an archive can be lent out only while no other
//! active loan holds it, and a surat number identifies at most one active
//! loan. Both rules are checked here and backed by partial unique indexes,
//! so concurrent requests cannot slip past the service checks.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_database::repositories::{ArchiveRepository, LoanRepository};
use arsip_entity::loan::{CreateLoan, Loan, DEFAULT_LOAN_DAYS};

use crate::context::RequestContext;

/// Lending operations for archives.
#[derive(Clone)]
pub struct LoanService {
    loan_repo: Arc<LoanRepository>,
    archive_repo: Arc<ArchiveRepository>,
}

/// Input for registering a loan.
#[derive(Debug, Clone)]
pub struct CreateLoanInput {
    pub archive_id: Uuid,
    pub surat_number: String,
    pub borrower_name: String,
    pub purpose: String,
    /// Defaults to today.
    pub borrow_date: Option<NaiveDate>,
    /// Defaults to the borrow date plus seven days.
    pub due_date: Option<NaiveDate>,
}

/// A loan row with its derived overdue flag.
#[derive(Debug, Clone, Serialize)]
pub struct LoanView {
    pub loan: Loan,
    pub is_overdue: bool,
}

impl LoanService {
    pub fn new(loan_repo: Arc<LoanRepository>, archive_repo: Arc<ArchiveRepository>) -> Self {
        Self {
            loan_repo,
            archive_repo,
        }
    }

    /// Register a loan for an available archive.
    pub async fn create_loan(&self, ctx: &RequestContext, input: CreateLoanInput) -> AppResult<Loan> {
        let archive = self
            .archive_repo
            .find_by_id(input.archive_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {} not found", input.archive_id)))?;
        ctx.require_access(archive.owner_id, "lend this archive")?;

        let surat_number = required_field(&input.surat_number, "Surat number")?;
        let borrower_name = required_field(&input.borrower_name, "Borrower name")?;
        let purpose = required_field(&input.purpose, "Purpose")?;

        if let Some(existing) = self.loan_repo.find_active_by_surat(&surat_number).await? {
            return Err(AppError::precondition(format!(
                "Surat number '{}' already belongs to an active loan (archive {})",
                surat_number, existing.archive_id
            )));
        }
        if let Some(active) = self.loan_repo.find_active_by_archive(input.archive_id).await? {
            return Err(AppError::precondition(format!(
                "Archive '{}' is on loan to {} until {}",
                archive.title, active.borrower_name, active.due_date
            )));
        }

        let borrow_date = input.borrow_date.unwrap_or_else(|| Utc::now().date_naive());
        let due_date = input
            .due_date
            .unwrap_or(borrow_date + Duration::days(DEFAULT_LOAN_DAYS));
        if due_date < borrow_date {
            return Err(AppError::validation(
                "Due date cannot precede the borrow date",
            ));
        }

        let loan = self
            .loan_repo
            .create(&CreateLoan {
                archive_id: input.archive_id,
                surat_number,
                borrower_name,
                purpose,
                borrow_date,
                due_date,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            loan_id = %loan.id,
            archive_id = %loan.archive_id,
            due_date = %loan.due_date,
            "Loan registered"
        );
        Ok(loan)
    }

    /// Close an active loan. Returning twice is an error; the first
    /// return date is the record of fact.
    pub async fn return_loan(
        &self,
        ctx: &RequestContext,
        loan_id: Uuid,
        return_date: Option<NaiveDate>,
    ) -> AppResult<Loan> {
        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Loan {loan_id} not found")))?;

        let archive = self
            .archive_repo
            .find_by_id(loan.archive_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {} not found", loan.archive_id)))?;
        ctx.require_access(archive.owner_id, "close this loan")?;

        if let Some(returned_on) = loan.return_date {
            return Err(AppError::precondition(format!(
                "Loan '{}' was already returned on {}",
                loan.surat_number, returned_on
            )));
        }

        let return_date = return_date.unwrap_or_else(|| Utc::now().date_naive());
        if return_date < loan.borrow_date {
            return Err(AppError::validation(
                "Return date cannot precede the borrow date",
            ));
        }

        let closed = self.loan_repo.mark_returned(loan.id, return_date).await?;

        info!(
            user_id = %ctx.user_id,
            loan_id = %closed.id,
            archive_id = %closed.archive_id,
            "Loan returned"
        );
        Ok(closed)
    }

    pub async fn get_loan(&self, ctx: &RequestContext, loan_id: Uuid) -> AppResult<LoanView> {
        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Loan {loan_id} not found")))?;

        let archive = self
            .archive_repo
            .find_by_id(loan.archive_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Archive {} not found", loan.archive_id)))?;
        ctx.require_access(archive.owner_id, "view this loan")?;

        Ok(into_view(loan))
    }

    pub async fn list_loans(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LoanView>> {
        let owner_filter = if ctx.is_admin() {
            None
        } else {
            Some(ctx.user_id)
        };

        let loans = self.loan_repo.find_page(owner_filter, page).await?;
        Ok(loans.map(into_view))
    }

    /// Whether the archive is currently lent out.
    pub async fn has_active_loan(&self, archive_id: Uuid) -> AppResult<bool> {
        self.loan_repo.has_active_loan(archive_id).await
    }
}

fn required_field(value: &str, label: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn into_view(loan: Loan) -> LoanView {
    let is_overdue = loan.is_overdue(Utc::now().date_naive());
    LoanView { loan, is_overdue }
}
