//! # arsip-core
//!
//! Shared foundation for the Arsip Hub records management service:
//! configuration loading, the unified error type, and common value types
//! used by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use config::AppConfig;
pub use error::{ApiErrorResponse, AppError, ErrorKind};
pub use result::AppResult;
