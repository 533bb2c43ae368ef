//! Administrative account management.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use arsip_auth::password::{PasswordHasher, PasswordValidator};
use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_core::types::pagination::{PageRequest, PageResponse};
use arsip_database::repositories::UserRepository;
use arsip_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Account administration: listing, creation, and role changes.
#[derive(Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    password_validator: PasswordValidator,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: UserRole,
}

impl AdminUserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: PasswordHasher,
        password_validator: PasswordValidator,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_validator,
        }
    }

    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        ctx.require_admin("list user accounts")?;
        self.user_repo.find_page(page).await
    }

    pub async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
        ctx.require_admin("view user accounts")?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        input: CreateUserInput,
    ) -> AppResult<User> {
        ctx.require_admin("create user accounts")?;

        let username = input.username.trim().to_lowercase();
        if username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters long",
            ));
        }
        self.password_validator.validate(&input.password)?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                password_hash,
                display_name: input.display_name,
                role: input.role,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User account created"
        );
        Ok(user)
    }

    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: UserRole,
    ) -> AppResult<User> {
        ctx.require_admin("change user roles")?;

        // An admin demoting themselves could leave the system without
        // any administrator.
        if ctx.user_id == id && role != UserRole::Admin {
            return Err(AppError::validation(
                "You cannot remove your own administrator role",
            ));
        }

        let user = self
            .user_repo
            .update_role(id, role)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        info!(admin_id = %ctx.user_id, user_id = %user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    /// Create the first administrator account when the user table is
    /// empty. Called once at startup; does nothing on later starts.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        if self.user_repo.count().await? > 0 {
            return Ok(None);
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.trim().to_lowercase(),
                password_hash,
                display_name: None,
                role: UserRole::Admin,
            })
            .await?;

        warn!(
            username = %user.username,
            "Bootstrap administrator created; change its password after first login"
        );
        Ok(Some(user))
    }
}
