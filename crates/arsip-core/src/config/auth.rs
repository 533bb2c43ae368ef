//! Authentication configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing JWTs. Must be at least 32 characters.
    pub jwt_secret: String,
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_hours: i64,
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    /// Credentials for the administrator account created on first start
    /// when the user table is empty. Both must be set or both absent.
    #[serde(default)]
    pub bootstrap_admin_username: Option<String>,
    #[serde(default)]
    pub bootstrap_admin_password: Option<String>,
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    24 * 7
}

fn default_password_min_length() -> usize {
    8
}
