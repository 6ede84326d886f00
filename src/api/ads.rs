//! Ad Routes
//!
//! Routes:
//! - POST /api/ads - Create an ad from details and 3-9 photos
//!
//! Requires the API key when one is configured.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    middleware,
    routing::post,
    Json, Router,
};
use tracing::debug;

use crate::middleware::require_api_key;
use crate::models::{validate_image_count, AdArtifacts, AdDetails, UploadedImage, MAX_IMAGES};
use crate::{AppState, Error, Result};

/// Headroom on top of the photos for the text fields and multipart framing.
const FORM_OVERHEAD: usize = 1024 * 1024;

pub fn routes(state: AppState) -> Router<AppState> {
    let limit = body_limit(state.config.storage.max_image_size);

    // The limit is enforced while the multipart stream is read, so the
    // image count can be checked before an oversized body is rejected.
    Router::new()
        .route("/", post(create_ad))
        .layer(DefaultBodyLimit::max(limit))
        .layer(middleware::from_fn_with_state(state, require_api_key))
}

/// Largest accepted request body: nine full-size photos plus the form.
pub fn body_limit(max_image_size: usize) -> usize {
    max_image_size
        .saturating_mul(MAX_IMAGES)
        .saturating_add(FORM_OVERHEAD)
}

/// Create an ad.
///
/// POST /api/ads
///
/// Accepts multipart/form-data with the seller fields as text parts and
/// the photos as repeated "images" file parts.
#[axum::debug_handler]
async fn create_ad(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AdArtifacts>> {
    let max_size = state.config.storage.max_image_size;
    let mut fields = HashMap::new();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size, "Failed to read multipart field"))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == "images" {
            // Reject a tenth photo before buffering it
            if images.len() >= MAX_IMAGES {
                validate_image_count(images.len() + 1)?;
            }

            let filename = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, max_size, "Failed to read file"))?;

            // Browsers send an empty part for an untouched file input
            if data.is_empty() && filename.as_deref().unwrap_or_default().is_empty() {
                continue;
            }

            if data.len() > max_size {
                return Err(Error::FileTooLarge { max_size });
            }

            images.push(UploadedImage::new(filename, data));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, max_size, "Failed to read field"))?;
            fields.insert(field_name, value);
        }
    }

    debug!(fields = fields.len(), images = images.len(), "Received ad form");

    let details = AdDetails::from_fields(fields)?;
    let artifacts = state.ads.create_ad(details, images).await?;

    Ok(Json(artifacts))
}

/// Body limit hits become 413, anything else is a malformed form.
fn multipart_error(err: MultipartError, max_size: usize, context: &str) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::FileTooLarge { max_size }
    } else {
        Error::InvalidInput(format!("{}: {}", context, err))
    }
}
