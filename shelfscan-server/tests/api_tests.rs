//! Integration tests for the Shelfscan Server API

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use image::{GrayImage, ImageFormat};
use serde_json::Value;
use shelfscan_core::barcode::ean13;
use shelfscan_core::catalog::CatalogResolver;
use shelfscan_core::error::CatalogError;
use shelfscan_core::store::MemoryLibraryStore;
use shelfscan_core::BookMetadata;
use shelfscan_server::routes::create_router;
use shelfscan_server::state::AppState;
use std::io::Cursor;
use std::sync::Arc;

const PRIDE_AND_PREJUDICE: &str = "9780141439518";

/// Catalog resolver that knows exactly one book
struct SingleBookCatalog;

#[async_trait]
impl CatalogResolver for SingleBookCatalog {
    async fn resolve(&self, isbn: &str) -> Result<BookMetadata, CatalogError> {
        if isbn == PRIDE_AND_PREJUDICE {
            Ok(BookMetadata {
                title: "Pride and Prejudice".to_string(),
                author: "Jane Austen".to_string(),
                isbn: isbn.to_string(),
                cover_url: String::new(),
            })
        } else {
            Err(CatalogError::NotFound(isbn.to_string()))
        }
    }
}

fn create_test_server() -> TestServer {
    let state = AppState::with_parts(
        Arc::new(MemoryLibraryStore::new()),
        Arc::new(SingleBookCatalog),
    );
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn barcode_png(code: &str) -> Vec<u8> {
    let row = ean13::synthesize_row(code, 3);
    let width = row.len() as u32;
    let mut img = GrayImage::new(width, 40);
    for y in 0..40 {
        for (x, &px) in row.iter().enumerate() {
            img.put_pixel(x as u32, y, image::Luma([px]));
        }
    }
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn blank_png() -> Vec<u8> {
    let img = GrayImage::from_pixel(300, 40, image::Luma([255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn scan_form(owner_id: &str, image: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_text("owner_id", owner_id.to_string()).add_part(
        "image",
        Part::bytes(image).file_name("scan.png").mime_type("image/png"),
    )
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_scan_persists_and_lists() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["code"], "persisted");
    assert_eq!(body["record"]["title"], "Pride and Prejudice");
    assert_eq!(body["record"]["status"], "not_started");
    assert_eq!(body["record"]["owner_id"], "user-1");

    let list = server
        .get("/api/v1/library")
        .add_query_param("owner_id", "user-1")
        .await;
    list.assert_status_ok();
    let list: Value = list.json();
    assert_eq!(list["total"], 1);
    assert_eq!(list["records"][0]["isbn"], PRIDE_AND_PREJUDICE);
}

#[tokio::test]
async fn test_scan_twice_conflicts() {
    let server = create_test_server();

    server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let second = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await;
    second.assert_status(axum::http::StatusCode::CONFLICT);
    let body: Value = second.json();
    assert_eq!(body["code"], "duplicate");

    let list = server
        .get("/api/v1/library")
        .add_query_param("owner_id", "user-1")
        .await;
    let list: Value = list.json();
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_scan_unknown_isbn_not_found() {
    let server = create_test_server();

    // Valid EAN-13, but the catalog has no entry for it
    let response = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png("9780441013593")))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "not_in_catalog");
}

#[tokio::test]
async fn test_scan_without_barcode_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", blank_png()))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "no_barcode");
}

#[tokio::test]
async fn test_scan_garbage_image_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", b"not an image".to_vec()))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_image");
}

#[tokio::test]
async fn test_scan_requires_owner_and_image() {
    let server = create_test_server();

    let missing_image = server
        .post("/api/v1/scan")
        .multipart(MultipartForm::new().add_text("owner_id", "user-1"))
        .await;
    missing_image.assert_status_bad_request();

    let missing_owner = server
        .post("/api/v1/scan")
        .multipart(MultipartForm::new().add_part(
            "image",
            Part::bytes(blank_png()).file_name("scan.png").mime_type("image/png"),
        ))
        .await;
    missing_owner.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_requires_owner_id() {
    let server = create_test_server();

    let response = server.get("/api/v1/library").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_filters_by_status_and_search() {
    let server = create_test_server();
    server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let hits = server
        .get("/api/v1/library")
        .add_query_param("owner_id", "user-1")
        .add_query_param("search", "austen")
        .add_query_param("status", "not_started")
        .await;
    hits.assert_status_ok();
    let hits: Value = hits.json();
    assert_eq!(hits["total"], 1);

    let misses = server
        .get("/api/v1/library")
        .add_query_param("owner_id", "user-1")
        .add_query_param("status", "completed")
        .await;
    let misses: Value = misses.json();
    assert_eq!(misses["total"], 0);

    let bad_status = server
        .get("/api/v1/library")
        .add_query_param("owner_id", "user-1")
        .add_query_param("status", "unread")
        .await;
    bad_status.assert_status_bad_request();
}

#[tokio::test]
async fn test_get_record_validation() {
    let server = create_test_server();

    server
        .get("/api/v1/library/not-a-uuid")
        .await
        .assert_status_bad_request();

    server
        .get("/api/v1/library/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_status_update_flow() {
    let server = create_test_server();

    let created: Value = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await
        .json();
    let id = created["record"]["id"].as_str().unwrap().to_string();

    let updated = server
        .put(&format!("/api/v1/library/{}/status", id))
        .json(&serde_json::json!({ "status": "in_progress" }))
        .await;
    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!(updated["status"], "in_progress");

    let fetched: Value = server.get(&format!("/api/v1/library/{}", id)).await.json();
    assert_eq!(fetched["status"], "in_progress");

    let invalid = server
        .put(&format!("/api/v1/library/{}/status", id))
        .json(&serde_json::json!({ "status": "abandoned" }))
        .await;
    invalid.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_flow() {
    let server = create_test_server();

    let created: Value = server
        .post("/api/v1/scan")
        .multipart(scan_form("user-1", barcode_png(PRIDE_AND_PREJUDICE)))
        .await
        .json();
    let id = created["record"]["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/v1/library/{}", id))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/v1/library/{}", id))
        .await
        .assert_status_not_found();

    // Deleting again reports not found
    server
        .delete(&format!("/api/v1/library/{}", id))
        .await
        .assert_status_not_found();
}
