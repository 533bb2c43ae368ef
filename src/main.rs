//! Arsip Hub server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use arsip_core::config::AppConfig;
use arsip_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `ARSIP_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let environment = std::env::var("ARSIP_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&environment)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Arsip Hub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = arsip_database::connection::DatabasePool::connect(&config.database).await?;
    arsip_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(arsip_database::repositories::UserRepository::new(
        db.pool().clone(),
    ));
    let archive_repo = Arc::new(arsip_database::repositories::ArchiveRepository::new(
        db.pool().clone(),
    ));
    let loan_repo = Arc::new(arsip_database::repositories::LoanRepository::new(
        db.pool().clone(),
    ));
    let handover_repo = Arc::new(arsip_database::repositories::HandoverRepository::new(
        db.pool().clone(),
    ));

    // ── Step 3: Auth components ──────────────────────────────────
    let password_hasher = arsip_auth::PasswordHasher::new();
    let password_validator = arsip_auth::PasswordValidator::new(&config.auth);
    let jwt_encoder = arsip_auth::JwtEncoder::new(&config.auth);
    let jwt_decoder = arsip_auth::JwtDecoder::new(&config.auth);

    // ── Step 4: Services ─────────────────────────────────────────
    let auth_service = Arc::new(arsip_service::AuthService::new(
        Arc::clone(&user_repo),
        password_hasher.clone(),
        jwt_encoder,
        jwt_decoder.clone(),
    ));
    let admin_user_service = Arc::new(arsip_service::AdminUserService::new(
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
    ));
    let archive_service = Arc::new(arsip_service::ArchiveService::new(
        Arc::clone(&archive_repo),
        Arc::clone(&loan_repo),
        Arc::clone(&handover_repo),
    ));
    let recalculation_service = Arc::new(arsip_service::RecalculationService::new(Arc::clone(
        &archive_repo,
    )));
    let loan_service = Arc::new(arsip_service::LoanService::new(
        Arc::clone(&loan_repo),
        Arc::clone(&archive_repo),
    ));
    let handover_service = Arc::new(arsip_service::HandoverService::new(
        Arc::clone(&handover_repo),
        Arc::clone(&archive_repo),
        Arc::clone(&loan_repo),
    ));

    // ── Step 5: Bootstrap admin account ──────────────────────────
    if let (Some(username), Some(password)) = (
        config.auth.bootstrap_admin_username.as_deref(),
        config.auth.bootstrap_admin_password.as_deref(),
    ) {
        if let Some(admin) = admin_user_service.bootstrap_admin(username, password).await? {
            tracing::info!(username = %admin.username, "Bootstrap admin account created");
        }
    }

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = arsip_api::AppState {
        config: Arc::new(config.clone()),
        db_pool: db.pool().clone(),
        jwt_decoder: Arc::new(jwt_decoder),
        auth_service,
        admin_user_service,
        archive_service,
        recalculation_service,
        loan_service,
        handover_service,
    };

    let app = arsip_api::build_router(app_state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Arsip Hub listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Arsip Hub shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
