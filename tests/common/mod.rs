//! Common test utilities and helpers.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use ganudenu::api;
use ganudenu::config::Config;
use ganudenu::AppState;
use image::{ImageFormat, Rgb, RgbImage};

/// Encode a solid-colour PNG.
pub fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

/// Small, fast configuration rooted at `root` with post rendering off.
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::with_data_dir(root);
    config.media.collage_size = 90;
    config.media.generate_posts = false;
    config
}

/// Start an in-process server for `config`.
pub async fn test_server(config: Config) -> TestServer {
    let state = AppState::from_config(config)
        .await
        .expect("Failed to build app state");
    TestServer::new(api::app(state)).expect("Failed to start test server")
}

/// Seller fields of a sample ad.
pub fn sample_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("model", "Toyota Aqua"),
        ("manufacture_year", "2015"),
        ("price", "6500000"),
        ("location", "Colombo"),
        ("price_type", "Negotiable"),
        ("phone", "0771234567"),
        ("condition", "Used"),
    ]
}

/// Multipart ad form with the sample fields and `images` small photos.
pub fn ad_form(images: usize) -> MultipartForm {
    let mut form = MultipartForm::new();
    for (name, value) in sample_fields() {
        form = form.add_text(name, value);
    }
    add_images(form, images)
}

/// Append `count` photos as "images" parts.
pub fn add_images(mut form: MultipartForm, count: usize) -> MultipartForm {
    for i in 0..count {
        let shade = ((i * 20) % 200) as u8;
        let part = Part::bytes(png_bytes(40, 30, [shade, 100, 200 - shade]))
            .file_name(format!("photo{}.png", i + 1))
            .mime_type("image/png");
        form = form.add_part("images", part);
    }
    form
}
