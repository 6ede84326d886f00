//! Low level compositing helpers shared by the post designs.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Vertical linear gradient from `start` (top row) to `end` (bottom row).
pub fn vertical_gradient(width: u32, height: u32, start: Rgb<u8>, end: Rgb<u8>) -> RgbImage {
    let span = height.saturating_sub(1).max(1) as f32;
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        let ratio = y as f32 / span;
        let mix = |a: u8, b: u8| (f32::from(a) * (1.0 - ratio) + f32::from(b) * ratio) as u8;
        let color = Rgb([
            mix(start[0], end[0]),
            mix(start[1], end[1]),
            mix(start[2], end[2]),
        ]);
        for x in 0..width {
            img.put_pixel(x, y, color);
        }
    }
    img
}

/// Scale an image to cover `target` and center-crop the overflow.
pub fn fit_image(img: &RgbImage, target: (u32, u32)) -> RgbImage {
    let (tw, th) = target;
    let (iw, ih) = img.dimensions();
    let scale = (tw as f32 / iw.max(1) as f32).max(th as f32 / ih.max(1) as f32);
    // float rounding can leave us a pixel short of the box
    let nw = ((iw as f32 * scale) as u32).max(tw);
    let nh = ((ih as f32 * scale) as u32).max(th);
    let resized = imageops::resize(img, nw, nh, FilterType::Lanczos3);
    let left = (nw - tw) / 2;
    let top = (nh - th) / 2;
    imageops::crop_imm(&resized, left, top, tw, th).to_image()
}

/// Coverage mask for a rectangle with rounded corners.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = radius.min(width / 2).min(height / 2) as f32;
    let (w, h) = (width as f32, height as f32);
    GrayImage::from_fn(width, height, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let cx = px.clamp(r, w - r);
        let cy = py.clamp(r, h - r);
        let inside = (px - cx).powi(2) + (py - cy).powi(2) <= r * r;
        Luma([if inside { 255 } else { 0 }])
    })
}

/// Blend `src` onto `canvas` at `(x, y)` using `mask` as per-pixel alpha.
///
/// Pixels falling outside the canvas are dropped.
pub fn composite_masked(canvas: &mut RgbImage, src: &RgbImage, mask: &GrayImage, x: i64, y: i64) {
    for (mx, my, alpha) in mask.enumerate_pixels() {
        let a = alpha[0];
        if a == 0 {
            continue;
        }
        let Some((cx, cy)) = canvas_coords(canvas, x + i64::from(mx), y + i64::from(my)) else {
            continue;
        };
        let over = src.get_pixel(mx, my);
        let under = canvas.get_pixel_mut(cx, cy);
        *under = blend(*under, *over, a);
    }
}

/// Paint a solid colour through `mask`.
pub fn fill_masked(canvas: &mut RgbImage, color: Rgb<u8>, mask: &GrayImage, x: i64, y: i64) {
    for (mx, my, alpha) in mask.enumerate_pixels() {
        let a = alpha[0];
        if a == 0 {
            continue;
        }
        if let Some((cx, cy)) = canvas_coords(canvas, x + i64::from(mx), y + i64::from(my)) {
            let under = canvas.get_pixel_mut(cx, cy);
            *under = blend(*under, color, a);
        }
    }
}

/// Fill a rounded rectangle spanning `top_left..=bottom_right`.
pub fn fill_rounded_rect(
    canvas: &mut RgbImage,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    radius: u32,
    color: Rgb<u8>,
) {
    let width = (bottom_right.0 - top_left.0 + 1).max(0) as u32;
    let height = (bottom_right.1 - top_left.1 + 1).max(0) as u32;
    if width == 0 || height == 0 {
        return;
    }
    let mask = rounded_mask(width, height, radius);
    fill_masked(canvas, color, &mask, top_left.0, top_left.1);
}

/// Blurred drop shadow for a `width` x `height` card.
///
/// The returned mask is padded by `blur * 2` plus the offset, with the card
/// footprint placed at `(blur + max(dx, 0), blur + max(dy, 0))`. Values are
/// alpha for a black fill.
pub fn drop_shadow(width: u32, height: u32, offset: (i32, i32), blur: u32, opacity: u8) -> GrayImage {
    let full_w = width + offset.0.unsigned_abs() + blur * 2;
    let full_h = height + offset.1.unsigned_abs() + blur * 2;
    let left = blur + offset.0.max(0) as u32;
    let top = blur + offset.1.max(0) as u32;

    // A blurred rectangle is smooth, so blur at reduced resolution and
    // scale back up.
    let factor = if blur >= 8 { 4 } else { 1 };
    let small_w = (full_w / factor).max(1);
    let small_h = (full_h / factor).max(1);
    let (l, t) = (left / factor, top / factor);
    let (r, b) = ((left + width) / factor, (top + height) / factor);
    let small = GrayImage::from_fn(small_w, small_h, |x, y| {
        let inside = x >= l && x < r && y >= t && y < b;
        Luma([if inside { opacity } else { 0 }])
    });

    let sigma = (blur as f32 / factor as f32).max(0.5);
    let blurred = imageops::blur(&small, sigma);
    if factor == 1 {
        return blurred;
    }
    imageops::resize(&blurred, full_w, full_h, FilterType::Triangle)
}

fn canvas_coords(canvas: &RgbImage, x: i64, y: i64) -> Option<(u32, u32)> {
    let (w, h) = canvas.dimensions();
    if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
        return None;
    }
    Some((x as u32, y as u32))
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = u32::from(alpha);
    let mix = |u: u8, o: u8| ((u32::from(o) * a + u32::from(u) * (255 - a) + 127) / 255) as u8;
    Rgb([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
    ])
}
