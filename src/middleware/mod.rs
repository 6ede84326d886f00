//! Middleware for Ganudenu.
//!
//! - `api_key` - optional shared-key check for write endpoints

mod api_key;

pub use api_key::{keys_match, require_api_key, API_KEY_HEADER};
