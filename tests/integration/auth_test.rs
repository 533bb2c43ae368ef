//! Integration tests for the authentication flow.

use axum::http::StatusCode;

use arsip_entity::user::UserRole;

use crate::helpers::{unique, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_returns_token_pair_and_user() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["user"]["username"].as_str(), Some(username.as_str()));
    // The password hash never leaves the server.
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_with_unknown_username_matches_wrong_password_error() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "not-the-password",
            })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": unique("nobody"),
                "password": "password123",
            })),
            None,
        )
        .await;

    // Identical responses, so the API does not reveal which accounts exist.
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.body["message"],
        unknown_user.body["message"]
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn refresh_issues_a_new_token_pair() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "password123",
            })),
            None,
        )
        .await;
    let refresh_token = login.body["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn access_token_is_rejected_where_a_refresh_token_is_expected() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let access_token = app.login(&username, "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn me_returns_the_authenticated_profile() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["username"].as_str(),
        Some(username.as_str())
    );
    assert_eq!(response.body["data"]["role"].as_str(), Some("admin"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
