//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use arsip_auth::jwt::decoder::JwtDecoder;
use arsip_core::config::AppConfig;
use arsip_service::archive::{ArchiveService, RecalculationService};
use arsip_service::auth::AuthService;
use arsip_service::handover::HandoverService;
use arsip_service::loan::LoanService;
use arsip_service::user::AdminUserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Login, refresh, and profile service
    pub auth_service: Arc<AuthService>,
    /// Admin user management service
    pub admin_user_service: Arc<AdminUserService>,
    /// Archive CRUD and retention service
    pub archive_service: Arc<ArchiveService>,
    /// Bulk retention recalculation service
    pub recalculation_service: Arc<RecalculationService>,
    /// Loan service
    pub loan_service: Arc<LoanService>,
    /// Handover proposal service
    pub handover_service: Arc<HandoverService>,
}
