//! API key authentication middleware.
//!
//! When an API key is configured, requests must carry it in the
//! `x-api-key` header. With no key configured the check is disabled and
//! every request passes.
//!
//! Keys are compared by SHA-256 digest in constant time, so response timing
//! does not reveal how much of a guessed key matched.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{error::Error, AppState};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that requires the configured API key.
///
/// # Errors
///
/// Returns 401 Unauthorized if a key is configured and the `x-api-key`
/// header is missing or does not match.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware, routing::post};
/// use ganudenu::middleware::require_api_key;
///
/// let app = Router::new()
///     .route("/api/ads", post(create_ad))
///     .layer(middleware::from_fn_with_state(state.clone(), require_api_key));
/// ```
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    if let Some(expected) = state.config.auth.api_key.as_deref() {
        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(Error::Unauthenticated)?;

        if !keys_match(provided, expected) {
            tracing::warn!("Rejected request to {} with invalid API key", req.uri().path());
            return Err(Error::InvalidApiKey);
        }
    }

    Ok(next.run(req).await)
}

/// Compare a provided key to the expected one without early exit.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    constant_time_eq(&digest(provided), &digest(expected))
}

fn digest(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
