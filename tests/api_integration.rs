//! API Integration Tests for Ganudenu Server
//!
//! Tests the HTTP endpoints using axum-test against a server rooted in a
//! temporary directory.

mod common;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use common::{ad_form, add_images, sample_fields, test_config, test_server};
use serde_json::Value;
use tempfile::TempDir;

fn api_key_header() -> HeaderName {
    HeaderName::from_static("x-api-key")
}

// ============================================================================
// Public Pages
// ============================================================================

#[tokio::test]
async fn test_upload_page_renders() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Ganudenu.store"));
    assert!(html.contains("/api/ads"));
    assert!(html.contains("name=\"images\""));
}

#[tokio::test]
async fn test_upload_page_uses_site_name() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.site.name = "Wheels & Deals".into();
    let server = test_server(config).await;

    let html = server.get("/").await.text();
    assert!(html.contains("Wheels &amp; Deals"));
}

#[tokio::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

// ============================================================================
// Ad Creation
// ============================================================================

#[tokio::test]
async fn test_create_ad_returns_artifacts() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.post("/api/ads").multipart(ad_form(4)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let ad_id = body["ad_id"].as_str().unwrap().to_string();

    assert_eq!(
        body["collage_url"],
        format!("/generated/collages/{}.jpg", ad_id)
    );
    assert_eq!(
        body["collage_download_url"],
        format!("/api/collage/{}.jpg", ad_id)
    );

    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 10);
    assert_eq!(
        pages[0],
        format!("/generated/ads/{}/template1.html", ad_id)
    );

    let images = body["image_urls"].as_array().unwrap();
    assert_eq!(images.len(), 4);
    assert_eq!(images[0], format!("/generated/ads/{}/img_1.png", ad_id));

    assert!(body["posts"].as_object().unwrap().is_empty());

    // Files land on disk
    assert!(dir
        .path()
        .join("generated/collages")
        .join(format!("{}.jpg", ad_id))
        .exists());
    assert!(dir
        .path()
        .join("uploads")
        .join(&ad_id)
        .join("img_4.png")
        .exists());
}

#[tokio::test]
async fn test_generated_output_is_served() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let body: Value = server.post("/api/ads").multipart(ad_form(3)).await.json();

    let page_url = body["pages"][2].as_str().unwrap();
    let page = server.get(page_url).await;
    page.assert_status_ok();
    let html = page.text();
    assert!(html.contains("Toyota Aqua"));
    assert!(html.contains("0771234567"));
    assert!(html.contains(body["image_urls"][0].as_str().unwrap()));

    let collage = server.get(body["collage_url"].as_str().unwrap()).await;
    collage.assert_status_ok();
    let decoded = image::load_from_memory(collage.as_bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (90, 90));

    let photo = server.get(body["image_urls"][1].as_str().unwrap()).await;
    photo.assert_status_ok();
}

#[tokio::test]
async fn test_create_ad_escapes_seller_text() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let mut form = MultipartForm::new();
    for (name, value) in sample_fields() {
        let value = if name == "model" {
            "<script>alert(1)</script>"
        } else {
            value
        };
        form = form.add_text(name, value);
    }
    let body: Value = server
        .post("/api/ads")
        .multipart(add_images(form, 3))
        .await
        .json();

    let html = server.get(body["pages"][0].as_str().unwrap()).await.text();
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_create_ad_with_too_few_images() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.post("/api/ads").multipart(ad_form(2)).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Please upload at least 3 images.");
}

#[tokio::test]
async fn test_create_ad_with_too_many_images() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.post("/api/ads").multipart(ad_form(10)).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Please upload a maximum of 9 images."));
}

#[tokio::test]
async fn test_create_ad_counts_images_before_body_limit() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.storage.max_image_size = 1_500_000;
    let server = test_server(config).await;

    // Ten parts just under the per-file cap add up to more than the body cap
    let mut form = MultipartForm::new();
    for (name, value) in sample_fields() {
        form = form.add_text(name, value);
    }
    for i in 0..10 {
        let part = Part::bytes(vec![0u8; 1_490_000])
            .file_name(format!("big{}.jpg", i + 1))
            .mime_type("image/jpeg");
        form = form.add_part("images", part);
    }

    let response = server.post("/api/ads").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["message"],
        "Please upload a maximum of 9 images."
    );
}

#[tokio::test]
async fn test_create_ad_body_over_limit_is_413() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.storage.max_image_size = 1000;
    let server = test_server(config).await;

    let form = ad_form(0).add_text("notes", "x".repeat(2 * 1024 * 1024));

    let response = server.post("/api/ads").multipart(form).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_create_ad_with_missing_field() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let mut form = MultipartForm::new();
    for (name, value) in sample_fields() {
        if name != "phone" {
            form = form.add_text(name, value);
        }
    }

    let response = server.post("/api/ads").multipart(add_images(form, 3)).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Missing required field: phone"));
}

#[tokio::test]
async fn test_create_ad_rejects_oversized_image() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.storage.max_image_size = 32;
    let server = test_server(config).await;

    let response = server.post("/api/ads").multipart(ad_form(3)).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_create_ad_tolerates_unreadable_image() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let junk = Part::bytes(b"definitely not an image".to_vec())
        .file_name("broken.jpg")
        .mime_type("image/jpeg");
    let form = add_images(ad_form(0), 2).add_part("images", junk);

    let response = server.post("/api/ads").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["image_urls"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_ad_with_posts() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.media.generate_posts = true;
    let server = test_server(config).await;

    let response = server.post("/api/ads").multipart(ad_form(3)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let posts = body["posts"].as_object().unwrap();
    assert_eq!(posts.len(), 3);

    for design in ganudenu_imaging::POST_DESIGNS {
        let url = posts[design].as_str().unwrap();
        server.get(url).await.assert_status_ok();
    }
}

// ============================================================================
// API Key
// ============================================================================

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.auth.api_key = Some("s3cret".into());
    let server = test_server(config).await;

    let missing = server.post("/api/ads").multipart(ad_form(3)).await;
    missing.assert_status(StatusCode::UNAUTHORIZED);

    let wrong = server
        .post("/api/ads")
        .add_header(api_key_header(), HeaderValue::from_static("guess"))
        .multipart(ad_form(3))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = wrong.json();
    assert_eq!(body["error"]["code"], "INVALID_API_KEY");

    let right = server
        .post("/api/ads")
        .add_header(api_key_header(), HeaderValue::from_static("s3cret"))
        .multipart(ad_form(3))
        .await;
    right.assert_status_ok();
}

#[tokio::test]
async fn test_api_key_not_needed_for_public_routes() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.auth.api_key = Some("s3cret".into());
    let server = test_server(config).await;

    server.get("/").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
}

// ============================================================================
// Collage Download
// ============================================================================

#[tokio::test]
async fn test_collage_download() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let body: Value = server.post("/api/ads").multipart(ad_form(3)).await.json();
    let url = body["collage_download_url"].as_str().unwrap();

    let response = server.get(url).await;
    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "image/jpeg");

    let disposition = response.header(header::CONTENT_DISPOSITION);
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!("{}.jpg", body["ad_id"].as_str().unwrap())));

    assert!(image::load_from_memory(response.as_bytes()).is_ok());
}

#[tokio::test]
async fn test_collage_download_missing() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;

    let response = server.get("/api/collage/nope.jpg").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_collage_download_rejects_traversal() {
    let dir = TempDir::new().unwrap();
    let server = test_server(test_config(dir.path())).await;
    std::fs::write(dir.path().join("generated/secret.jpg"), b"x").unwrap();

    let response = server.get("/api/collage/..%2Fsecret.jpg").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
