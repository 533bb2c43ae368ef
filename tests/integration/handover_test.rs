//! Integration tests for the handover proposal lifecycle and the
//! availability gate it shares with loans.

use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use arsip_entity::user::UserRole;

use crate::helpers::{unique, TestApp};

async fn propose(app: &TestApp, token: &str, archive_ids: &[Uuid]) -> Value {
    let response = app
        .request(
            "POST",
            "/api/handovers",
            Some(serde_json::json!({
                "surrendering_party": "Bagian Umum",
                "receiving_party": "Unit Kearsipan",
                "archive_ids": archive_ids,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["data"].clone()
}

fn archive_ids_of(view: &Value) -> Vec<String> {
    view["archives"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn creating_a_proposal_links_its_archives() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let first = app.create_archive(&token, "Berkas satu", None, None).await;
    let second = app.create_archive(&token, "Berkas dua", None, None).await;

    let data = propose(&app, &token, &[first, second]).await;

    assert_eq!(data["proposal"]["status"].as_str(), Some("PENDING"));
    assert_eq!(data["archives"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn archives_on_loan_cannot_be_proposed() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let on_loan = app
        .create_archive(&token, "Berkas dipinjam", None, None)
        .await;
    let clean = app
        .create_archive(&token, "Berkas bersih", None, None)
        .await;

    let loan = app
        .request(
            "POST",
            "/api/loans",
            Some(serde_json::json!({
                "archive_id": on_loan,
                "surat_number": unique("SP"),
                "borrower_name": "Pak Budi",
                "purpose": "Pemeriksaan",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(loan.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/handovers",
            Some(serde_json::json!({
                "surrendering_party": "Bagian Umum",
                "receiving_party": "Unit Kearsipan",
                "archive_ids": [clean, on_loan],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("on loan to Pak Budi"),
        "{:?}",
        response.body
    );

    // The failed call wrote nothing: the clean archive is still free to
    // join a new proposal.
    propose(&app, &token, &[clean]).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn an_archive_belongs_to_at_most_one_open_proposal() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas diperebutkan", None, None)
        .await;

    propose(&app, &token, &[archive_id]).await;

    let response = app
        .request(
            "POST",
            "/api/handovers",
            Some(serde_json::json!({
                "surrendering_party": "Bagian Umum",
                "receiving_party": "Unit Kearsipan",
                "archive_ids": [archive_id],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("already belongs to handover proposal"),
        "{:?}",
        response.body
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn approving_all_records_the_handover_details() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas diserahkan", None, None)
        .await;

    let data = propose(&app, &token, &[archive_id]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();
    let record_number = unique("ST/2025");

    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/approve"),
            Some(serde_json::json!({
                "record_number": record_number,
                "handover_date": "2025-08-01",
                "notes": "Lengkap",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let approved = &response.body["data"]["approved"]["proposal"];
    // Whole-proposal approval mutates the row in place.
    assert_eq!(approved["id"].as_str(), Some(proposal_id.as_str()));
    assert_eq!(approved["status"].as_str(), Some("APPROVED"));
    assert_eq!(
        approved["record_number"].as_str(),
        Some(record_number.as_str())
    );
    assert_eq!(approved["handover_date"].as_str(), Some("2025-08-01"));
    assert!(response.body["data"]["rejected"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn rejecting_all_keeps_the_archives_available() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas ditolak", None, None)
        .await;

    let data = propose(&app, &token, &[archive_id]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/reject"),
            Some(serde_json::json!({
                "rejection_reason": "Dokumen belum lengkap",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let rejected = &response.body["data"]["rejected"]["proposal"];
    assert_eq!(rejected["status"].as_str(), Some("REJECTED"));
    assert_eq!(
        rejected["rejection_reason"].as_str(),
        Some("Dokumen belum lengkap")
    );
    assert!(response.body["data"]["approved"].is_null());

    // A rejected proposal no longer blocks the archive.
    let availability = app
        .request(
            "GET",
            &format!("/api/archives/{archive_id}/availability"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(availability.body["data"]["available"].as_bool(), Some(true));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn a_split_decision_creates_a_second_proposal() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let keep = app.create_archive(&token, "Berkas rusak", None, None).await;
    let first = app
        .create_archive(&token, "Berkas layak satu", None, None)
        .await;
    let second = app
        .create_archive(&token, "Berkas layak dua", None, None)
        .await;

    let data = propose(&app, &token, &[keep, first, second]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/process"),
            Some(serde_json::json!({
                "approved_ids": [first, second],
                "rejected_ids": [keep],
                "record_number": unique("ST/2025"),
                "handover_date": "2025-08-01",
                "rejection_reason": "Kondisi fisik rusak",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let approved = &response.body["data"]["approved"];
    let rejected = &response.body["data"]["rejected"];

    // The approved archives move to a freshly created proposal; the
    // original row becomes the rejected one.
    assert_ne!(
        approved["proposal"]["id"].as_str(),
        Some(proposal_id.as_str())
    );
    assert_eq!(
        rejected["proposal"]["id"].as_str(),
        Some(proposal_id.as_str())
    );
    assert_eq!(approved["proposal"]["status"].as_str(), Some("APPROVED"));
    assert_eq!(rejected["proposal"]["status"].as_str(), Some("REJECTED"));

    let mut approved_ids = archive_ids_of(approved);
    approved_ids.sort();
    let mut expected = vec![first.to_string(), second.to_string()];
    expected.sort();
    assert_eq!(approved_ids, expected);
    assert_eq!(archive_ids_of(rejected), vec![keep.to_string()]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn deciding_a_proposal_requires_admin() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas biasa", None, None)
        .await;

    let data = propose(&app, &token, &[archive_id]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/approve"),
            Some(serde_json::json!({
                "record_number": unique("ST/2025"),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn a_decided_proposal_cannot_be_decided_again() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas final", None, None)
        .await;

    let data = propose(&app, &token, &[archive_id]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let first = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/reject"),
            Some(serde_json::json!({ "rejection_reason": "Salah unit" })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/approve"),
            Some(serde_json::json!({
                "record_number": unique("ST/2025"),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(
        second.body["message"]
            .as_str()
            .unwrap()
            .contains("has already been decided"),
        "{:?}",
        second.body
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn record_numbers_are_unique_across_proposals() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let first_archive = app
        .create_archive(&token, "Berkas pertama", None, None)
        .await;
    let second_archive = app
        .create_archive(&token, "Berkas kedua", None, None)
        .await;
    let record_number = unique("ST/2025");

    let first = propose(&app, &token, &[first_archive]).await;
    let first_id = first["proposal"]["id"].as_str().unwrap().to_string();
    let approved = app
        .request(
            "POST",
            &format!("/api/handovers/{first_id}/approve"),
            Some(serde_json::json!({ "record_number": record_number })),
            Some(&token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);

    let second = propose(&app, &token, &[second_archive]).await;
    let second_id = second["proposal"]["id"].as_str().unwrap().to_string();
    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{second_id}/approve"),
            Some(serde_json::json!({ "record_number": record_number })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("is already in use"),
        "{:?}",
        response.body
    );

    // The rejected approval left the proposal undecided.
    let after = app
        .request(
            "GET",
            &format!("/api/handovers/{second_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        after.body["data"]["proposal"]["status"].as_str(),
        Some("PENDING")
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn every_archive_in_the_proposal_must_be_decided() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let first = app.create_archive(&token, "Berkas satu", None, None).await;
    let second = app.create_archive(&token, "Berkas dua", None, None).await;

    let data = propose(&app, &token, &[first, second]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/handovers/{proposal_id}/process"),
            Some(serde_json::json!({
                "approved_ids": [first],
                "record_number": unique("ST/2025"),
                "handover_date": "2025-08-01",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("archive(s)"),
        "{:?}",
        response.body
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn availability_reports_a_clean_archive_as_free() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas bebas", None, None)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/archives/{archive_id}/availability"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["available"].as_bool(), Some(true));
    assert!(response.body["data"]["reason"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn availability_names_the_borrower_while_on_loan() {
    let app = TestApp::new().await;
    let username = unique("arsiparis");
    app.create_test_user(&username, "password123", UserRole::User)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas dipinjam", None, None)
        .await;

    app.request(
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

    let response = app
        .request(
            "GET",
            &format!("/api/archives/{archive_id}/availability"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.body["data"]["available"].as_bool(), Some(false));
    let reason = response.body["data"]["reason"].as_str().unwrap();
    assert!(reason.contains("On loan to Ibu Sari"), "{reason}");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn availability_reports_pending_and_approved_proposals() {
    let app = TestApp::new().await;
    let username = unique("kepala");
    app.create_test_user(&username, "password123", UserRole::Admin)
        .await;
    let token = app.login(&username, "password123").await;
    let archive_id = app
        .create_archive(&token, "Berkas diserahkan", None, None)
        .await;

    let data = propose(&app, &token, &[archive_id]).await;
    let proposal_id = data["proposal"]["id"].as_str().unwrap().to_string();

    let pending = app
        .request(
            "GET",
            &format!("/api/archives/{archive_id}/availability"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(pending.body["data"]["available"].as_bool(), Some(false));
    assert!(
        pending.body["data"]["reason"]
            .as_str()
            .unwrap()
            .contains("pending handover proposal"),
        "{:?}",
        pending.body
    );

    let record_number = unique("ST/2025");
    app.request(
        "POST",
        &format!("/api/handovers/{proposal_id}/approve"),
        Some(serde_json::json!({ "record_number": record_number })),
        Some(&token),
    )
    .await;

    let approved = app
        .request(
            "GET",
            &format!("/api/archives/{archive_id}/availability"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(approved.body["data"]["available"].as_bool(), Some(false));
    let reason = approved.body["data"]["reason"].as_str().unwrap();
    assert!(
        reason.contains(&format!("Handed over under record number {record_number}")),
        "{reason}"
    );
}
