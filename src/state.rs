//! Application state for Ganudenu.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::config::{self, Config};
use crate::services::{AdService, StorageLayout, TemplateService};
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: Arc<Config>,
    /// Page template renderer.
    pub templates: Arc<TemplateService>,
    /// Ad creation pipeline.
    pub ads: AdService,
}

impl AppState {
    /// Create application state from the global configuration.
    pub async fn new() -> Result<Self> {
        Self::from_config(config::config().clone()).await
    }

    /// Create application state from an explicit configuration.
    ///
    /// Creates the storage directories if they do not exist yet.
    pub async fn from_config(config: Config) -> Result<Self> {
        let storage = StorageLayout::new(&config.storage);
        storage.ensure_dirs().await?;

        let templates = Arc::new(TemplateService::new()?);
        let ads = AdService::new(
            storage,
            templates.clone(),
            config.media.clone(),
            config.site.name.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            templates,
            ads,
        })
    }
}
