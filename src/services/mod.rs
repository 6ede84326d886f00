//! Service layer for Ganudenu.
//!
//! Contains the ad pipeline and its collaborators:
//! - Ads (upload storage, collage, pages, social posts)
//! - Templates (embedded Jinja-style page templates)
//! - Storage (on-disk layout and public URLs)

mod ads;
pub mod storage;
mod templates;

pub use ads::AdService;
pub use storage::StorageLayout;
pub use templates::{PageContext, TemplateService, PAGE_TEMPLATES, UI_TEMPLATE};
