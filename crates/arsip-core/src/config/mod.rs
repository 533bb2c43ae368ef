//! Layered application configuration.
//!
//! Values are loaded from `config/default.toml`, overlaid by an optional
//! environment file (`config/{env}.toml`) and finally by environment
//! variables prefixed with `ARSIP__` (e.g. `ARSIP__DATABASE__URL`).

pub mod app;
pub mod auth;
pub mod logging;

use config::{Config, Environment, File};
use serde::Deserialize;

pub use app::{CorsConfig, DatabaseConfig, ServerConfig};
pub use auth::AuthConfig;
pub use logging::LoggingConfig;

use crate::error::AppError;
use crate::result::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    pub fn load(environment: &str) -> AppResult<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                Environment::with_prefix("ARSIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.len() < 32 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 32 characters",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be greater than zero",
            ));
        }
        if self.auth.bootstrap_admin_username.is_some() != self.auth.bootstrap_admin_password.is_some()
        {
            return Err(AppError::configuration(
                "auth.bootstrap_admin_username and auth.bootstrap_admin_password must be set together",
            ));
        }
        Ok(())
    }
}
