//! 3x3 photo collage.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

use crate::{open_rgb, save_jpeg, Error, Result};

/// Tiles per row and per column.
pub const GRID: u32 = 3;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BLANK_TILE: Rgb<u8> = Rgb([240, 240, 240]);

/// Output settings for [`make_collage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollageOptions {
    pub width: u32,
    pub height: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            quality: 90,
        }
    }
}

/// Fill the nine grid slots from `items`.
///
/// At most nine items are used. Shorter lists repeat from the start until
/// every slot is filled, so `[a, b, c, d]` becomes `a b c d a b c d a`.
pub fn collage_slots<T: Clone>(items: &[T]) -> Vec<T> {
    let slots = (GRID * GRID) as usize;
    items.iter().cycle().take(slots).cloned().collect()
}

/// Crop the largest centered square out of an image.
pub fn center_crop_square(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let side = w.min(h);
    let left = (w - side) / 2;
    let top = (h - side) / 2;
    imageops::crop_imm(img, left, top, side, side).to_image()
}

/// Build a 3x3 collage from up to nine images and write it as JPEG.
///
/// Images that fail to decode become light grey tiles instead of failing
/// the whole collage.
pub fn make_collage<P: AsRef<Path>>(
    image_paths: &[P],
    output_path: &Path,
    options: &CollageOptions,
) -> Result<()> {
    if image_paths.is_empty() {
        return Err(Error::InvalidInput("image paths must not be empty".into()));
    }

    let tile_w = (options.width / GRID).max(1);
    let tile_h = (options.height / GRID).max(1);
    let mut collage = RgbImage::from_pixel(options.width, options.height, BACKGROUND);

    let paths: Vec<&Path> = image_paths.iter().map(|p| p.as_ref()).collect();
    for (i, path) in collage_slots(&paths).into_iter().enumerate() {
        let img = open_rgb(path).unwrap_or_else(|| {
            warn!("Using blank tile for unreadable image {}", path.display());
            RgbImage::from_pixel(tile_w, tile_h, BLANK_TILE)
        });

        let square = center_crop_square(&img);
        let tile = imageops::resize(&square, tile_w, tile_h, FilterType::Lanczos3);

        let i = i as u32;
        let (row, col) = (i / GRID, i % GRID);
        imageops::replace(
            &mut collage,
            &tile,
            i64::from(col * tile_w),
            i64::from(row * tile_h),
        );
    }

    save_jpeg(&collage, output_path, options.quality)?;
    debug!(
        "Collage written to {} ({}x{})",
        output_path.display(),
        options.width,
        options.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn solid(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(w, h, Rgb(color)).save(&path).unwrap();
        path
    }

    fn close_to(actual: &Rgb<u8>, expected: [u8; 3]) -> bool {
        actual
            .0
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| (i16::from(*a) - i16::from(*e)).abs() <= 12)
    }

    #[test]
    fn test_collage_slots_repeats_short_lists() {
        assert_eq!(
            collage_slots(&["a", "b", "c"]),
            vec!["a", "b", "c", "a", "b", "c", "a", "b", "c"]
        );
        assert_eq!(
            collage_slots(&["a", "b", "c", "d"]),
            vec!["a", "b", "c", "d", "a", "b", "c", "d", "a"]
        );
        assert_eq!(collage_slots(&["x"]), vec!["x"; 9]);
    }

    #[test]
    fn test_collage_slots_truncates_long_lists() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(collage_slots(&items), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_collage_slots_empty() {
        let empty: [&str; 0] = [];
        assert!(collage_slots(&empty).is_empty());
    }

    #[test]
    fn test_center_crop_square() {
        let mut img = RgbImage::from_pixel(30, 10, Rgb([0, 0, 0]));
        // mark the middle third
        for x in 10..20 {
            for y in 0..10 {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }
        let square = center_crop_square(&img);
        assert_eq!(square.dimensions(), (10, 10));
        assert!(square.pixels().all(|p| *p == Rgb([255, 0, 0])));

        let tall = RgbImage::new(7, 20);
        assert_eq!(center_crop_square(&tall).dimensions(), (7, 7));
    }

    #[test]
    fn test_make_collage_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let empty: Vec<PathBuf> = vec![];
        let err = make_collage(&empty, &dir.path().join("c.jpg"), &CollageOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_make_collage_tiles_in_row_major_order() {
        let dir = tempfile::tempdir().unwrap();
        let red = solid(dir.path(), "red.png", 50, 40, [220, 20, 20]);
        let green = solid(dir.path(), "green.png", 40, 60, [20, 200, 20]);
        let blue = solid(dir.path(), "blue.png", 30, 30, [20, 20, 220]);
        let out = dir.path().join("collage.jpg");
        let options = CollageOptions {
            width: 300,
            height: 300,
            quality: 95,
        };

        make_collage(&[red, green, blue], &out, &options).unwrap();

        let collage = image::open(&out).unwrap().to_rgb8();
        assert_eq!(collage.dimensions(), (300, 300));
        // centers of each tile: red green blue / red green blue / red green blue
        let expected = [[220, 20, 20], [20, 200, 20], [20, 20, 220]];
        for row in 0..3 {
            for col in 0..3 {
                let px = collage.get_pixel(col * 100 + 50, row * 100 + 50);
                assert!(
                    close_to(px, expected[col as usize]),
                    "tile ({}, {}) was {:?}",
                    row,
                    col,
                    px
                );
            }
        }
    }

    /// Path wrapper without `Clone`, like a caller-owned handle.
    struct Photo(PathBuf);

    impl AsRef<Path> for Photo {
        fn as_ref(&self) -> &Path {
            &self.0
        }
    }

    #[test]
    fn test_make_collage_accepts_non_clone_paths() {
        let dir = tempfile::tempdir().unwrap();
        let photos = [
            Photo(solid(dir.path(), "a.png", 12, 12, [200, 200, 200])),
            Photo(solid(dir.path(), "b.png", 12, 12, [10, 10, 10])),
        ];
        let out = dir.path().join("collage.jpg");
        let options = CollageOptions {
            width: 60,
            height: 60,
            quality: 90,
        };

        make_collage(&photos, &out, &options).unwrap();

        let collage = image::open(&out).unwrap().to_rgb8();
        assert_eq!(collage.dimensions(), (60, 60));
        // slot 2 repeats the first photo
        assert!(close_to(collage.get_pixel(50, 10), [200, 200, 200]));
    }

    #[test]
    fn test_make_collage_blank_tile_for_unreadable_image() {
        let dir = tempfile::tempdir().unwrap();
        let good = solid(dir.path(), "good.png", 20, 20, [0, 0, 0]);
        let bad = dir.path().join("bad.jpg");
        std::fs::write(&bad, b"not a jpeg").unwrap();
        let out = dir.path().join("collage.jpg");
        let options = CollageOptions {
            width: 90,
            height: 90,
            quality: 95,
        };

        make_collage(&[good, bad], &out, &options).unwrap();

        let collage = image::open(&out).unwrap().to_rgb8();
        assert!(close_to(collage.get_pixel(15, 15), [0, 0, 0]));
        assert!(close_to(collage.get_pixel(45, 15), [240, 240, 240]));
    }
}
