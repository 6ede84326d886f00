//! Data models for Ganudenu.
//!
//! Defines the vehicle ad submitted by sellers and the artifacts
//! generated for it.

mod ad;

pub use ad::*;

use uuid::Uuid;

/// Generate a new ad ID
pub fn new_ad_id() -> Uuid {
    Uuid::new_v4()
}
