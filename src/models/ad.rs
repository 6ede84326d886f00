//! Vehicle ad model and the artifacts generated for it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Fewest photos an ad may have.
pub const MIN_IMAGES: usize = 3;
/// Most photos an ad may have (one per collage tile).
pub const MAX_IMAGES: usize = 9;

/// Extensions kept as-is when saving uploads. Anything else is stored as `.jpg`.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Form fields every ad must carry, in form order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "model",
    "manufacture_year",
    "price",
    "location",
    "price_type",
    "phone",
    "condition",
];

// ============================================================================
// Ad Details
// ============================================================================

/// How the asking price is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum PriceType {
    #[value(name = "Negotiable")]
    Negotiable,
    #[value(name = "Fixed")]
    Fixed,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Negotiable => "Negotiable",
            PriceType::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text details of a vehicle ad as submitted by the seller.
///
/// Values are kept verbatim; the server does not interpret prices or years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdDetails {
    pub model: String,
    pub manufacture_year: String,
    pub price: String,
    pub location: String,
    /// Usually "Negotiable" or "Fixed"
    pub price_type: String,
    pub phone: String,
    pub condition: String,
}

impl AdDetails {
    /// Build details from multipart text fields.
    ///
    /// Every field in [`REQUIRED_FIELDS`] must be present; the first missing
    /// one is reported.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Result<Self> {
        let mut take = |name: &str| {
            fields
                .remove(name)
                .ok_or_else(|| Error::Validation(format!("Missing required field: {}", name)))
        };

        Ok(Self {
            model: take("model")?,
            manufacture_year: take("manufacture_year")?,
            price: take("price")?,
            location: take("location")?,
            price_type: take("price_type")?,
            phone: take("phone")?,
            condition: take("condition")?,
        })
    }

    /// Field name/value pairs in form order.
    pub fn form_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("model", self.model.as_str()),
            ("manufacture_year", self.manufacture_year.as_str()),
            ("price", self.price.as_str()),
            ("location", self.location.as_str()),
            ("price_type", self.price_type.as_str()),
            ("phone", self.phone.as_str()),
            ("condition", self.condition.as_str()),
        ]
    }
}

// ============================================================================
// Uploads
// ============================================================================

/// One uploaded photo.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client supplied filename, if any
    pub filename: Option<String>,
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new(filename: Option<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename,
            data: data.into(),
        }
    }

    /// Storage extension derived from the original filename.
    pub fn extension(&self) -> &'static str {
        normalize_extension(self.filename.as_deref().unwrap_or_default())
    }

    /// Name the upload is stored under: `img_<n><ext>`, `n` counting from 1.
    pub fn stored_name(&self, index: usize) -> String {
        format!("img_{}{}", index + 1, self.extension())
    }
}

/// Lowercased extension of `filename` (with the dot) when it is an accepted
/// image type, `.jpg` otherwise.
pub fn normalize_extension(filename: &str) -> &'static str {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()));

    ext.and_then(|ext| ALLOWED_EXTENSIONS.iter().copied().find(|a| *a == ext))
        .unwrap_or(".jpg")
}

/// Check the photo count against [`MIN_IMAGES`]..=[`MAX_IMAGES`].
pub fn validate_image_count(count: usize) -> Result<()> {
    if count < MIN_IMAGES {
        return Err(Error::Validation(format!(
            "Please upload at least {} images.",
            MIN_IMAGES
        )));
    }
    if count > MAX_IMAGES {
        return Err(Error::Validation(format!(
            "Please upload a maximum of {} images.",
            MAX_IMAGES
        )));
    }
    Ok(())
}

// ============================================================================
// Generated Artifacts
// ============================================================================

/// Public URLs of everything generated for an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdArtifacts {
    pub ad_id: Uuid,
    pub collage_url: String,
    pub collage_download_url: String,
    pub pages: Vec<String>,
    pub image_urls: Vec<String>,
    /// Post design name to URL; empty when post rendering is disabled
    #[serde(default)]
    pub posts: BTreeMap<String, String>,
}
