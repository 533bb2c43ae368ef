//! Login, token refresh, and profile lookup.

use std::sync::Arc;

use tracing::info;

use arsip_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use arsip_auth::password::PasswordHasher;
use arsip_core::error::AppError;
use arsip_core::result::AppResult;
use arsip_database::repositories::UserRepository;
use arsip_entity::user::User;

use crate::context::RequestContext;

/// Handles credential verification and token issuance.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

/// A successful login: the account plus a fresh token pair.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: PasswordHasher,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Verify credentials and issue tokens.
    ///
    /// Unknown usernames and wrong passwords produce the same error so
    /// the response does not reveal which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        self.user_repo.update_last_login(user.id).await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginOutcome { user, tokens })
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The account is re-read so the new tokens carry the current role
    /// even if it changed since the refresh token was issued.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        self.encoder
            .generate_token_pair(user.id, user.role, &user.username)
    }

    /// The full account row for the authenticated user.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
