//! Image rendering for vehicle ads.
//!
//! Two products are built from the photos a seller uploads:
//! - a 3x3 collage (`collage`), used as the listing's cover image
//! - a set of social post designs (`posts`) with the ad details drawn
//!   next to the first photo
//!
//! All functions here are synchronous and CPU bound. Async callers should
//! run them on a blocking thread.
//!
//! # Example
//!
//! ```rust,no_run
//! use ganudenu_imaging::{make_collage, CollageOptions};
//!
//! let photos = ["front.jpg", "side.jpg", "interior.jpg"];
//! make_collage(&photos, "cover.jpg".as_ref(), &CollageOptions::default()).unwrap();
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};
use tracing::debug;

mod collage;
mod draw;
mod error;
mod font;
mod posts;

pub use collage::{center_crop_square, collage_slots, make_collage, CollageOptions, GRID};
pub use draw::{fit_image, vertical_gradient};
pub use error::{Error, Result};
pub use font::{load_font, SYSTEM_FONT_CANDIDATES};
pub use posts::{generate_post_images, PostContext, POST_DESIGNS};

pub use ab_glyph::FontVec;

/// Open an image and convert it to RGB.
///
/// The format is sniffed from the file contents, so uploads saved under a
/// fallback extension still decode. Returns `None` when the file cannot be
/// read or decoded.
pub fn open_rgb(path: &Path) -> Option<RgbImage> {
    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode());

    match decoded {
        Ok(img) => Some(img.to_rgb8()),
        Err(e) => {
            debug!("Could not open image {}: {}", path.display(), e);
            None
        }
    }
}

/// Encode an RGB image as JPEG.
pub fn save_jpeg(img: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    encoder.encode_image(img)?;
    Ok(())
}
