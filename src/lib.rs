//! Ganudenu - Vehicle Ad Builder
//!
//! Takes a vehicle ad (seller details plus 3-9 photos) and publishes a
//! photo collage, ten HTML listing pages and optional social post images.
//! Also ships a small client for submitting ads to a running server.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
