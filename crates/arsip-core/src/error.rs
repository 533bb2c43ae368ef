//! Unified error handling for the application.
//!
//! Every fallible operation in the workspace returns [`AppError`], which
//! carries a machine-readable [`ErrorKind`], a human-readable message, and
//! an optional source error. The kind alone decides the HTTP status code,
//! so the mapping lives here next to the type instead of in the API layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of application errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested resource does not exist.
    NotFound,
    /// Missing or invalid credentials.
    Authentication,
    /// The caller is authenticated but not allowed to do this.
    Authorization,
    /// The request payload is malformed or fails validation rules.
    Validation,
    /// The request is well-formed but a business rule forbids it
    /// (archive on loan, duplicate record number, undecided archives).
    Precondition,
    /// The operation lost a race or hit a uniqueness conflict.
    Conflict,
    /// A database operation failed.
    Database,
    /// The service configuration is invalid or incomplete.
    Configuration,
    /// Serialization or deserialization failed.
    Serialization,
    /// Any other internal failure.
    Internal,
}

impl ErrorKind {
    /// Stable identifier used in API error bodies and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Authentication => "AUTHENTICATION",
            ErrorKind::Authorization => "AUTHORIZATION",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Precondition => "PRECONDITION_FAILED",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Database => "DATABASE",
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::Serialization => "SERIALIZATION",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// HTTP status code this kind maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Validation | ErrorKind::Precondition => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Precondition, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

// Manual Clone because the boxed source is not clonable; the copy keeps
// kind and message, which is all downstream consumers need.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, "JSON serialization failed", err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, "I/O operation failed", err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, "Failed to load configuration", err)
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: kind.as_str().to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        // Server-side failures are logged with their full chain but the
        // client only sees a generic message.
        let message = if self.kind.is_server_error() {
            tracing::error!(
                kind = %self.kind,
                message = %self.message,
                source = ?self.source,
                "request failed"
            );
            "An internal error occurred".to_string()
        } else {
            self.message.clone()
        };

        (status, Json(ApiErrorResponse::new(self.kind, message))).into_response()
    }
}
