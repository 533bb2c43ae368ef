//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the JWT by the API layer and passed into every service
/// method so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the user may act on a resource owned by `owner_id`.
    /// Admins see everything; everyone else only their own records.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }

    /// Like [`can_access`](Self::can_access) but returns an authorization
    /// error naming the attempted action.
    pub fn require_access(&self, owner_id: Uuid, action: &str) -> AppResult<()> {
        if self.can_access(owner_id) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "You are not allowed to {action}"
            )))
        }
    }

    /// Fails with an authorization error unless the user is an admin.
    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only administrators may {action}"
            )))
        }
    }
}
