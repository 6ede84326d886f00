//! Collage Routes
//!
//! Routes:
//! - GET /api/collage/:filename - Download a generated collage

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
    routing::get,
    Router,
};

use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/:filename", get(download_collage))
}

/// Download a collage as an attachment.
///
/// GET /api/collage/:filename
///
/// Names that are not a single path component are treated as missing.
#[axum::debug_handler]
async fn download_collage(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let not_found = || Error::NotFound("Collage not found".into());

    let path = state
        .ads
        .storage()
        .collage_path(&filename)
        .ok_or_else(not_found)?;

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(Error::Internal(format!("Failed to read collage: {}", e))),
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| Error::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
