//! Route definitions for the Arsip Hub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(archive_routes())
        .merge(classification_routes())
        .merge(loan_routes())
        .merge(handover_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Archive CRUD, retention, availability, and bulk import
fn archive_routes() -> Router<AppState> {
    Router::new()
        .route("/archives", get(handlers::archive::list_archives))
        .route("/archives", post(handlers::archive::create_archive))
        .route("/archives/import", post(handlers::archive::import_archives))
        .route("/archives/{id}", get(handlers::archive::get_archive))
        .route("/archives/{id}", put(handlers::archive::update_archive))
        .route("/archives/{id}", delete(handlers::archive::delete_archive))
        .route(
            "/archives/{id}/retention",
            get(handlers::archive::get_retention),
        )
        .route(
            "/archives/{id}/availability",
            get(handlers::archive::check_availability),
        )
}

/// Retention schedule listing
fn classification_routes() -> Router<AppState> {
    Router::new().route(
        "/classifications",
        get(handlers::classification::list_classifications),
    )
}

/// Loan registration and returns
fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/loans", get(handlers::loan::list_loans))
        .route("/loans", post(handlers::loan::create_loan))
        .route("/loans/{id}", get(handlers::loan::get_loan))
        .route("/loans/{id}/return", put(handlers::loan::return_loan))
}

/// Handover proposal lifecycle
fn handover_routes() -> Router<AppState> {
    Router::new()
        .route("/handovers", get(handlers::handover::list_handovers))
        .route("/handovers", post(handlers::handover::create_handover))
        .route("/handovers/{id}", get(handlers::handover::get_handover))
        .route(
            "/handovers/{id}/process",
            post(handlers::handover::process_handover),
        )
        .route(
            "/handovers/{id}/approve",
            post(handlers::handover::approve_handover),
        )
        .route(
            "/handovers/{id}/reject",
            post(handlers::handover::reject_handover),
        )
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        // Retention recalculation
        .route(
            "/admin/archives/recalculate",
            post(handlers::admin::recalculation::recalculate),
        )
        .route(
            "/admin/archives/recalculate/preview",
            get(handlers::admin::recalculation::preview),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
