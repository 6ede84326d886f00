//! Social post designs.
//!
//! Each design places the first photo of the ad as a rounded "hero" card
//! with a drop shadow on a dark gradient, then draws the ad details beside
//! or below it:
//!
//! | name                 | size      | layout                          |
//! |----------------------|-----------|---------------------------------|
//! | `modern_square_1080` | 1080x1080 | hero left, details right, badge |
//! | `portrait_1200x1500` | 1200x1500 | hero top, details band bottom   |
//! | `link_1200x628`      | 1200x628  | wide banner with call button    |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, warn};

use crate::draw::{
    composite_masked, drop_shadow, fill_masked, fill_rounded_rect, fit_image, rounded_mask,
    vertical_gradient,
};
use crate::{open_rgb, save_jpeg, Error, Result};

/// Names of the rendered designs, in render order.
pub const POST_DESIGNS: [&str; 3] = ["modern_square_1080", "portrait_1200x1500", "link_1200x628"];

const GRADIENT_TOP: Rgb<u8> = Rgb([21, 27, 36]);
const GRADIENT_BOTTOM: Rgb<u8> = Rgb([10, 12, 18]);
const FALLBACK_HERO: Rgb<u8> = Rgb([30, 35, 45]);
const TITLE: Rgb<u8> = Rgb([229, 231, 235]);
const MUTED: Rgb<u8> = Rgb([156, 163, 175]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const ACCENT: Rgb<u8> = Rgb([59, 130, 246]);
const INDIGO: Rgb<u8> = Rgb([99, 102, 241]);
const BAND: Rgb<u8> = Rgb([24, 31, 44]);
const SHADOW_OPACITY: u8 = 110;

const TITLE_SIZE: f32 = 64.0;
const SUBTITLE_SIZE: f32 = 36.0;
const SMALL_SIZE: f32 = 28.0;

/// Ad details drawn on the posts.
#[derive(Debug, Clone, Default)]
pub struct PostContext {
    pub model: String,
    pub manufacture_year: String,
    pub price: String,
    pub location: String,
    pub price_type: String,
    pub phone: String,
    pub condition: String,
    pub site_name: String,
}

impl PostContext {
    fn title(&self) -> String {
        format!("{} {}", self.model, self.manufacture_year)
            .trim()
            .to_string()
    }
}

/// Where the hero card and its shadow go on a design.
struct HeroLayout {
    canvas: (u32, u32),
    hero_box: (u32, u32),
    radius: u32,
    hero_at: (i64, i64),
    shadow_offset: (i32, i32),
    shadow_blur: u32,
    shadow_at: (i64, i64),
}

/// Draws text when a font is available, otherwise does nothing.
struct TextPainter<'a> {
    font: Option<&'a FontVec>,
}

impl TextPainter<'_> {
    fn draw(&self, canvas: &mut RgbImage, at: (i32, i32), size: f32, color: Rgb<u8>, text: &str) {
        if let Some(font) = self.font {
            draw_text_mut(canvas, color, at.0, at.1, PxScale::from(size), font, text);
        }
    }
}

/// Render every design in [`POST_DESIGNS`] into `out_dir`.
///
/// Returns design name to written file path. The first image is the hero;
/// if it cannot be decoded a plain dark card is used instead.
pub fn generate_post_images<P: AsRef<Path>>(
    image_paths: &[P],
    out_dir: &Path,
    context: &PostContext,
    font: Option<&FontVec>,
    quality: u8,
) -> Result<BTreeMap<String, PathBuf>> {
    let first = image_paths
        .first()
        .ok_or_else(|| Error::InvalidInput("no images provided".into()))?;
    std::fs::create_dir_all(out_dir)?;

    let hero = open_rgb(first.as_ref()).unwrap_or_else(|| {
        warn!("Hero image unreadable, using placeholder card");
        RgbImage::from_pixel(1600, 1200, FALLBACK_HERO)
    });
    let painter = TextPainter { font };

    let designs = [
        modern_square(&hero, context, &painter),
        portrait(&hero, context, &painter),
        link_banner(&hero, context, &painter),
    ];

    let mut outputs = BTreeMap::new();
    for (name, canvas) in POST_DESIGNS.iter().zip(designs.iter()) {
        let path = out_dir.join(format!("{}.jpg", name));
        save_jpeg(canvas, &path, quality)?;
        debug!("Post design {} written to {}", name, path.display());
        outputs.insert((*name).to_string(), path);
    }

    Ok(outputs)
}

fn hero_canvas(hero: &RgbImage, layout: &HeroLayout) -> RgbImage {
    let (w, h) = layout.canvas;
    let mut canvas = vertical_gradient(w, h, GRADIENT_TOP, GRADIENT_BOTTOM);

    let card = fit_image(hero, layout.hero_box);
    let (cw, ch) = card.dimensions();
    let shadow = drop_shadow(
        cw,
        ch,
        layout.shadow_offset,
        layout.shadow_blur,
        SHADOW_OPACITY,
    );
    fill_masked(
        &mut canvas,
        Rgb([0, 0, 0]),
        &shadow,
        layout.shadow_at.0,
        layout.shadow_at.1,
    );

    let mask = rounded_mask(cw, ch, layout.radius);
    composite_masked(&mut canvas, &card, &mask, layout.hero_at.0, layout.hero_at.1);
    canvas
}

fn modern_square(hero: &RgbImage, ctx: &PostContext, text: &TextPainter<'_>) -> RgbImage {
    let mut canvas = hero_canvas(
        hero,
        &HeroLayout {
            canvas: (1080, 1080),
            hero_box: (640, 640),
            radius: 28,
            hero_at: (80, 140),
            shadow_offset: (0, 12),
            shadow_blur: 32,
            shadow_at: (64, 136),
        },
    );

    let x = 760;
    let mut y = 160;
    text.draw(&mut canvas, (x, y), TITLE_SIZE, TITLE, &ctx.title());
    y += 88;
    let lines = [
        format!("Price: {} ({})", ctx.price, ctx.price_type),
        format!("Condition: {}", ctx.condition),
        format!("Location: {}", ctx.location),
        format!("Contact: {}", ctx.phone),
    ];
    for line in &lines {
        text.draw(&mut canvas, (x, y), SUBTITLE_SIZE, MUTED, line);
        y += 50;
    }

    fill_rounded_rect(&mut canvas, (60, 60), (320, 120), 18, ACCENT);
    text.draw(&mut canvas, (76, 70), SMALL_SIZE, WHITE, &ctx.site_name);
    canvas
}

fn portrait(hero: &RgbImage, ctx: &PostContext, text: &TextPainter<'_>) -> RgbImage {
    let mut canvas = hero_canvas(
        hero,
        &HeroLayout {
            canvas: (1200, 1500),
            hero_box: (1100, 900),
            radius: 24,
            hero_at: (60, 100),
            shadow_offset: (0, 10),
            shadow_blur: 28,
            shadow_at: (50, 90),
        },
    );

    let band_top = 1050;
    fill_rounded_rect(&mut canvas, (60, i64::from(band_top)), (1140, 1420), 22, BAND);
    text.draw(&mut canvas, (90, band_top + 40), TITLE_SIZE, TITLE, &ctx.title());
    text.draw(
        &mut canvas,
        (90, band_top + 110),
        SUBTITLE_SIZE,
        MUTED,
        &format!("{} ({})", ctx.price, ctx.price_type),
    );
    text.draw(
        &mut canvas,
        (90, band_top + 160),
        SUBTITLE_SIZE,
        MUTED,
        &format!("{} \u{2022} {}", ctx.condition, ctx.location),
    );
    text.draw(
        &mut canvas,
        (90, band_top + 210),
        SUBTITLE_SIZE,
        MUTED,
        &format!("Contact: {}", ctx.phone),
    );
    text.draw(&mut canvas, (940, band_top + 210), SMALL_SIZE, INDIGO, &ctx.site_name);
    canvas
}

fn link_banner(hero: &RgbImage, ctx: &PostContext, text: &TextPainter<'_>) -> RgbImage {
    let mut canvas = hero_canvas(
        hero,
        &HeroLayout {
            canvas: (1200, 628),
            hero_box: (760, 560),
            radius: 22,
            hero_at: (50, 40),
            shadow_offset: (0, 8),
            shadow_blur: 22,
            shadow_at: (40, 34),
        },
    );

    text.draw(&mut canvas, (840, 60), TITLE_SIZE, TITLE, &ctx.title());
    text.draw(
        &mut canvas,
        (840, 140),
        SUBTITLE_SIZE,
        MUTED,
        &format!("{} ({})", ctx.price, ctx.price_type),
    );
    text.draw(&mut canvas, (840, 190), SUBTITLE_SIZE, MUTED, &ctx.condition);
    text.draw(&mut canvas, (840, 240), SUBTITLE_SIZE, MUTED, &ctx.location);
    fill_rounded_rect(&mut canvas, (840, 300), (1140, 360), 18, ACCENT);
    text.draw(
        &mut canvas,
        (860, 312),
        SMALL_SIZE,
        WHITE,
        &format!("Call {}", ctx.phone),
    );
    canvas
}
