//! # arsip-service
//!
//! Business logic for Arsip Hub. Each service orchestrates repositories
//! and auth components to implement one application area: archive
//! intake and retention, loans, handover proposals, and accounts.
//!
//! Services receive their dependencies as `Arc` references at
//! construction time.

pub mod archive;
pub mod auth;
pub mod context;
pub mod handover;
pub mod loan;
pub mod user;

pub use archive::{ArchiveService, RecalculationService};
pub use auth::AuthService;
pub use context::RequestContext;
pub use handover::HandoverService;
pub use loan::LoanService;
pub use user::AdminUserService;
