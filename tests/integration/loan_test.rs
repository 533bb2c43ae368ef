//! Integration tests for loan registration and returns.

use axum::http::StatusCode;

use arsip_entity::user::UserRole;

use crate::helpers::{unique, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn due_date_defaults_to_seven_days_after_borrowing() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas dipinjam", None, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
                "borrow_date": "2025-03-10",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["data"]["borrow_date"].as_str(),
        Some("2025-03-10")
    );
    assert_eq!(
        response.body["data"]["due_date"].as_str(),
        Some("2025-03-17")
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn surat_number_is_unique_among_active_loans() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let first_archive = app
        .create_archive(&token, "Berkas pertama", None, None)
        .await;
    let second_archive = app
        .create_archive(&token, "Berkas kedua", None, None)
        .await;
    let surat_number = unique("SP");

    let first = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": first_archive,
                "surat_number": surat_number,
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": second_archive,
                "surat_number": surat_number,
                "borrower_name": "Ibu Sari",
                "purpose": "Kajian",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert!(
        second.body["message"]
            .as_str()
            .unwrap()
            .contains("already belongs to an active loan"),
        "{:?}",
        second.body
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn archive_cannot_be_lent_out_twice() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas laris", None, None)
        .await;

    let first = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Ibu Sari",
                "purpose": "Kajian",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    let message = second.body["message"].as_str().unwrap();
    assert!(message.contains("on loan to Pak Budi"), "{message}");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn returning_frees_the_archive_and_the_surat_number() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas bergilir", None, None)
        .await;
    let surat_number = unique("SP");

    let loan = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": surat_number,
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
            })),
            Some(&token),
        )
        .await;
    let loan_id = loan.body["data"]["id"].as_str().unwrap().to_string();

    let returned = app
        .request(
            "PUT",
            &format!("/api/loans/{loan_id}/return"),
            Some(serde_json::json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(returned.status, StatusCode::OK, "{:?}", returned.body);
    assert!(returned.body["data"]["return_date"].is_string());

    // Same archive and same surat number may now be lent out again.
    let again = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": surat_number,
                "borrower_name": "Ibu Sari",
                "purpose": "Kajian lanjutan",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK, "{:?}", again.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn returning_twice_is_rejected() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas kembali", None, None)
        .await;

    let loan = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
            })),
            Some(&token),
        )
        .await;
    let loan_id = loan.body["data"]["id"].as_str().unwrap().to_string();

    let first = app
        .request(
            "PUT",
            &format!("/api/loans/{loan_id}/return"),
            Some(serde_json::json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "PUT",
            &format!("/api/loans/{loan_id}/return"),
            Some(serde_json::json!({})),
            Some(&token),
        )
        .await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert!(
        second.body["message"]
            .as_str()
            .unwrap()
            .contains("already returned"),
        "{:?}",
        second.body
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn due_date_cannot_precede_the_borrow_date() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas terbalik", None, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
                "borrow_date": "2025-03-10",
                "due_date": "2025-03-01",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn overdue_loans_are_flagged_on_read() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas terlambat", None, None)
        .await;

    let borrow = chrono::Utc::now().date_naive() - chrono::Duration::days(30);
    let due = borrow + chrono::Duration::days(7);
    let loan = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
                "borrow_date": borrow.format("%Y-%m-%d").to_string(),
                "due_date": due.format("%Y-%m-%d").to_string(),
            })),
            Some(&token),
        )
        .await;
    let loan_id = loan.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/loans/{loan_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_overdue"].as_bool(), Some(true));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn lending_someone_elses_archive_is_forbidden() {
    let app = TestApp::new().await;
    let owner = unique("owner");
    let other = unique("other");
    app.create_test_user(&owner, "password123", UserRole::User)
        .await;
    app.create_test_user(&other, "password123", UserRole::User)
        .await;
    let owner_token = app.login(&owner, "password123").await;
    let other_token = app.login(&other, "password123").await;
    let archive_id = app
        .create_archive(&owner_token, "Berkas orang lain", None, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": archive_id,
                "surat_number": unique("SP"),
                "borrower_name": "Tamu",
                "purpose": "Coba-coba",
            })),
            Some(&other_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
