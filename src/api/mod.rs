//! API Routes for Ganudenu
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod ads;
mod collage;
pub mod status;
mod ui;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::storage::GENERATED_URL_PREFIX;
use crate::AppState;

/// Build the complete API router.
///
/// Route structure:
/// - / - Upload UI (public)
/// - /health - Health check (public)
/// - /api/collage/:filename - Collage download (public)
/// - /api/ads - Ad creation (API key protected when a key is configured)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Upload page and health (public)
        .merge(ui::routes())
        .merge(status::routes())
        // Collage downloads (public)
        .nest("/api/collage", collage::routes())
        // Ad creation (API key)
        .nest("/api/ads", ads::routes(state))
}

/// Build the served application: routes, static output, tracing and CORS.
pub fn app(state: AppState) -> Router {
    let generated = ServeDir::new(state.ads.storage().generated_root());

    Router::new()
        .merge(routes(state.clone()))
        .nest_service(GENERATED_URL_PREFIX, generated)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
