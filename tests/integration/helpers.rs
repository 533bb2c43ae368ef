//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use arsip_core::config::AppConfig;
use arsip_entity::user::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = arsip_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        arsip_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.pool().clone();

        let user_repo = Arc::new(arsip_database::repositories::UserRepository::new(
            db_pool.clone(),
        ));
        let archive_repo = Arc::new(arsip_database::repositories::ArchiveRepository::new(
            db_pool.clone(),
        ));
        let loan_repo = Arc::new(arsip_database::repositories::LoanRepository::new(
            db_pool.clone(),
        ));
        let handover_repo = Arc::new(arsip_database::repositories::HandoverRepository::new(
            db_pool.clone(),
        ));

        let password_hasher = arsip_auth::PasswordHasher::new();
        let password_validator = arsip_auth::PasswordValidator::new(&config.auth);
        let jwt_encoder = arsip_auth::JwtEncoder::new(&config.auth);
        let jwt_decoder = arsip_auth::JwtDecoder::new(&config.auth);

        let app_state = arsip_api::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_decoder: Arc::new(jwt_decoder.clone()),
            auth_service: Arc::new(arsip_service::AuthService::new(
                Arc::clone(&user_repo),
                password_hasher.clone(),
                jwt_encoder,
                jwt_decoder,
            )),
            admin_user_service: Arc::new(arsip_service::AdminUserService::new(
                Arc::clone(&user_repo),
                password_hasher,
                password_validator,
            )),
            archive_service: Arc::new(arsip_service::ArchiveService::new(
                Arc::clone(&archive_repo),
                Arc::clone(&loan_repo),
                Arc::clone(&handover_repo),
            )),
            recalculation_service: Arc::new(arsip_service::RecalculationService::new(Arc::clone(
                &archive_repo,
            ))),
            loan_service: Arc::new(arsip_service::LoanService::new(
                Arc::clone(&loan_repo),
                Arc::clone(&archive_repo),
            )),
            handover_service: Arc::new(arsip_service::HandoverService::new(
                Arc::clone(&handover_repo),
                Arc::clone(&archive_repo),
                Arc::clone(&loan_repo),
            )),
        };

        let router = arsip_api::build_router(app_state);

        Self { router, db_pool }
    }

    /// Insert a user directly and return their ID.
    pub async fn create_test_user(&self, username: &str, password: &str, role: UserRole) -> Uuid {
        let hasher = arsip_auth::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (username, password_hash, display_name, role) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(username)
        .bind(&hash)
        .bind(username)
        .bind(role)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test user")
    }

    /// Login and return a JWT access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register an archive through the API and return its ID.
    pub async fn create_archive(
        &self,
        token: &str,
        title: &str,
        document_date: Option<&str>,
        classification_code: Option<&str>,
    ) -> Uuid {
        let body = serde_json::json!({
            "title": title,
            "document_date": document_date,
            "classification_code": classification_code,
        });

        let response = self
            .request("POST", "/api/archives", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Archive creation failed: {:?}",
            response.body
        );

        response.body["data"]["archive"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No archive id in response")
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A name that will not collide with rows left over from other tests
/// or earlier runs.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().to_string()[..8])
}

/// A date slightly more than `years` years before today, as
/// `YYYY-MM-DD`. The overshoot keeps boundary rounding out of status
/// assertions.
pub fn years_ago(years: i64) -> String {
    let date = chrono::Utc::now().date_naive() - chrono::Duration::days(years * 366);
    date.format("%Y-%m-%d").to_string()
}
