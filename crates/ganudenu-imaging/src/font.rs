//! Font discovery for post text.

use std::path::Path;

use ab_glyph::FontVec;
use tracing::{debug, info, warn};

/// Fonts probed when no explicit font is configured, in order.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "arial.ttf",
];

/// Load a TrueType/OpenType font.
///
/// Tries `explicit` first, then [`SYSTEM_FONT_CANDIDATES`]. Returns `None`
/// when nothing usable is found; post designs are then rendered without text.
pub fn load_font(explicit: Option<&Path>) -> Option<FontVec> {
    let candidates = explicit
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(Path::new));

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match read_font(path) {
            Some(font) => {
                info!("Using font {}", path.display());
                return Some(font);
            }
            None => debug!("Skipping unusable font {}", path.display()),
        }
    }

    warn!("No usable font found, post images will be rendered without text");
    None
}

fn read_font(path: &Path) -> Option<FontVec> {
    let bytes = std::fs::read(path).ok()?;
    FontVec::try_from_vec(bytes).ok()
}
