//! Ad creation pipeline.
//!
//! Turns a submitted ad (details plus 3-9 photos) into the published
//! artifacts: saved uploads, a collage, public photo copies, ten rendered
//! listing pages and, optionally, social post images.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use ganudenu_imaging::{
    generate_post_images, make_collage, CollageOptions, FontVec, PostContext,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::models::{self, validate_image_count, AdArtifacts, AdDetails, UploadedImage};
use crate::services::storage::{self, StorageLayout};
use crate::services::templates::{PageContext, TemplateService};
use crate::{Error, Result};

/// Builds and stores everything published for an ad.
#[derive(Clone)]
pub struct AdService {
    storage: StorageLayout,
    templates: Arc<TemplateService>,
    media: MediaConfig,
    site_name: String,
    font: Arc<Option<FontVec>>,
}

impl AdService {
    pub fn new(
        storage: StorageLayout,
        templates: Arc<TemplateService>,
        media: MediaConfig,
        site_name: String,
    ) -> Self {
        let font = if media.generate_posts {
            ganudenu_imaging::load_font(media.font_path.as_deref())
        } else {
            None
        };

        Self {
            storage,
            templates,
            media,
            site_name,
            font: Arc::new(font),
        }
    }

    pub fn storage(&self) -> &StorageLayout {
        &self.storage
    }

    /// Create an ad and return the public URLs of its artifacts.
    pub async fn create_ad(
        &self,
        details: AdDetails,
        images: Vec<UploadedImage>,
    ) -> Result<AdArtifacts> {
        validate_image_count(images.len())?;

        let ad_id = models::new_ad_id();
        let upload_dir = self.storage.ad_upload_dir(&ad_id);
        let generated_dir = self.storage.ad_generated_dir(&ad_id);
        create_dir(&upload_dir).await?;
        create_dir(&generated_dir).await?;

        info!(%ad_id, model = %details.model, images = images.len(), "Creating ad");

        // Save uploads
        let mut saved = Vec::with_capacity(images.len());
        for (idx, image) in images.iter().enumerate() {
            let path = upload_dir.join(image.stored_name(idx));
            tokio::fs::write(&path, &image.data)
                .await
                .map_err(|e| Error::Internal(format!("Failed to write upload: {}", e)))?;
            saved.push(path);
        }

        // Collage
        let collage_name = storage::collage_filename(&ad_id);
        let collage_path = self.storage.collages_dir().join(&collage_name);
        let options = CollageOptions {
            width: self.media.collage_size,
            height: self.media.collage_size,
            quality: self.media.jpeg_quality,
        };
        {
            let paths = saved.clone();
            let out = collage_path.clone();
            tokio::task::spawn_blocking(move || make_collage(&paths, &out, &options)).await??;
        }
        debug!(%ad_id, "Collage written to {}", collage_path.display());

        // Photo copies served next to the pages
        let mut image_urls = Vec::with_capacity(saved.len());
        for path in &saved {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            tokio::fs::copy(path, generated_dir.join(name))
                .await
                .map_err(|e| Error::Internal(format!("Failed to copy image: {}", e)))?;
            image_urls.push(storage::ad_asset_url(&ad_id, name));
        }

        let collage_url = storage::collage_url(&collage_name);
        let collage_download_url = storage::collage_download_url(&collage_name);

        // Listing pages
        let context = PageContext::new(
            &self.site_name,
            &details,
            image_urls.clone(),
            collage_url.clone(),
        );
        let mut pages = Vec::with_capacity(self.templates.page_names().len());
        for name in self.templates.page_names() {
            let html = self.templates.render_page(name, &context)?;
            tokio::fs::write(generated_dir.join(name), html)
                .await
                .map_err(|e| Error::Internal(format!("Failed to write page {}: {}", name, e)))?;
            pages.push(storage::ad_asset_url(&ad_id, name));
        }

        let posts = if self.media.generate_posts {
            self.render_posts(&ad_id, &details, saved).await?
        } else {
            BTreeMap::new()
        };

        info!(%ad_id, pages = pages.len(), posts = posts.len(), "Ad created");

        Ok(AdArtifacts {
            ad_id,
            collage_url,
            collage_download_url,
            pages,
            image_urls,
            posts,
        })
    }

    async fn render_posts(
        &self,
        ad_id: &Uuid,
        details: &AdDetails,
        saved: Vec<PathBuf>,
    ) -> Result<BTreeMap<String, String>> {
        let out_dir = self.storage.ad_posts_dir(ad_id);
        let context = PostContext {
            model: details.model.clone(),
            manufacture_year: details.manufacture_year.clone(),
            price: details.price.clone(),
            location: details.location.clone(),
            price_type: details.price_type.clone(),
            phone: details.phone.clone(),
            condition: details.condition.clone(),
            site_name: self.site_name.clone(),
        };
        let font = self.font.clone();
        let quality = self.media.jpeg_quality;

        let written = tokio::task::spawn_blocking(move || {
            generate_post_images(&saved, &out_dir, &context, (*font).as_ref(), quality)
        })
        .await??;

        Ok(written
            .into_iter()
            .filter_map(|(name, path)| {
                let file = path.file_name()?.to_str()?.to_string();
                Some((name, storage::post_url(ad_id, &file)))
            })
            .collect())
    }
}

async fn create_dir(path: &std::path::Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create directories: {}", e)))
}
