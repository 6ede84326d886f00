//! Upload UI Route
//!
//! Routes:
//! - GET / - Render the ad upload page

use axum::{extract::State, response::Html, routing::get, Router};

use crate::{AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Render the upload page.
///
/// GET /
async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let html = state.templates.render_ui(&state.config.site.name)?;
    Ok(Html(html))
}
