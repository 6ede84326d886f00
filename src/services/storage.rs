//! On-disk layout for uploads and generated output.
//!
//! ```text
//! {uploads}/{ad_id}/img_1.jpg ...            raw uploads
//! {generated}/collages/{ad_id}.jpg           collage, served and downloadable
//! {generated}/ads/{ad_id}/img_1.jpg ...      photo copies referenced by pages
//! {generated}/ads/{ad_id}/template1.html ... rendered pages
//! {generated}/ads/{ad_id}/posts/*.jpg        social post designs
//! ```
//!
//! Everything under `{generated}` is served at `/generated`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::StorageConfig;
use crate::{Error, Result};

/// URL prefix the generated root is mounted at.
pub const GENERATED_URL_PREFIX: &str = "/generated";
/// URL prefix of the collage download endpoint.
pub const COLLAGE_DOWNLOAD_PREFIX: &str = "/api/collage";

const COLLAGES_DIR: &str = "collages";
const ADS_DIR: &str = "ads";
const POSTS_DIR: &str = "posts";

#[derive(Debug, Clone)]
pub struct StorageLayout {
    uploads: PathBuf,
    generated: PathBuf,
}

impl StorageLayout {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            uploads: config.uploads_path.clone(),
            generated: config.generated_path.clone(),
        }
    }

    /// Create the fixed directories.
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.uploads.clone(),
            self.generated.clone(),
            self.collages_dir(),
            self.generated.join(ADS_DIR),
        ] {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                Error::Internal(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    pub fn generated_root(&self) -> &Path {
        &self.generated
    }

    pub fn collages_dir(&self) -> PathBuf {
        self.generated.join(COLLAGES_DIR)
    }

    pub fn ad_upload_dir(&self, ad_id: &Uuid) -> PathBuf {
        self.uploads.join(ad_id.to_string())
    }

    pub fn ad_generated_dir(&self, ad_id: &Uuid) -> PathBuf {
        self.generated.join(ADS_DIR).join(ad_id.to_string())
    }

    pub fn ad_posts_dir(&self, ad_id: &Uuid) -> PathBuf {
        self.ad_generated_dir(ad_id).join(POSTS_DIR)
    }

    /// Path of a collage by its public filename.
    ///
    /// Returns `None` for names that could escape the collage directory.
    pub fn collage_path(&self, filename: &str) -> Option<PathBuf> {
        is_safe_filename(filename).then(|| self.collages_dir().join(filename))
    }
}

/// Collage filename for an ad.
pub fn collage_filename(ad_id: &Uuid) -> String {
    format!("{}.jpg", ad_id)
}

/// Public URL of the collage image.
pub fn collage_url(filename: &str) -> String {
    format!("{}/{}/{}", GENERATED_URL_PREFIX, COLLAGES_DIR, filename)
}

/// Download endpoint URL of the collage image.
pub fn collage_download_url(filename: &str) -> String {
    format!("{}/{}", COLLAGE_DOWNLOAD_PREFIX, filename)
}

/// Public URL of a file in an ad's generated directory.
pub fn ad_asset_url(ad_id: &Uuid, name: &str) -> String {
    format!("{}/{}/{}/{}", GENERATED_URL_PREFIX, ADS_DIR, ad_id, name)
}

/// Public URL of a post design image.
pub fn post_url(ad_id: &Uuid, file_name: &str) -> String {
    ad_asset_url(ad_id, &format!("{}/{}", POSTS_DIR, file_name))
}

/// A single path component with no traversal.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}
