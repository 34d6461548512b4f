use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use anyhow::{anyhow, Result};
use tiny_skia::{Color, Pixmap, PremultipliedColorU8};

/// The viewer ships no bundled assets; the label face is picked up from the
/// usual system locations instead.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_ui_font() -> Result<FontVec> {
    for candidate in FONT_CANDIDATES {
        if let Ok(bytes) = std::fs::read(candidate) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                return Ok(font);
            }
        }
    }
    Err(anyhow!(
        "no usable sans-serif font found in {} known system locations",
        FONT_CANDIDATES.len()
    ))
}

/// Rasterizes a single line of text into a tight transparent pixmap.
///
/// Glyphs are laid out with kerning on a common baseline, the union of their
/// pixel bounds sizes the pixmap, and coverage is written premultiplied so
/// the result composes directly onto an opaque canvas.
pub fn render_text(font: &FontVec, text: &str, size_px: f32, color: Color) -> Pixmap {
    let scale = PxScale::from(size_px);
    let scaled = font.as_scaled(scale);

    let mut pen_x = 0.0f32;
    let mut glyphs: Vec<Glyph> = Vec::new();
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = glyphs.last() {
            pen_x += scaled.kern(prev.id, id);
        }
        glyphs.push(Glyph {
            id,
            scale,
            position: point(pen_x, scaled.ascent()),
        });
        pen_x += scaled.h_advance(id);
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for glyph in &glyphs {
        if let Some(outlined) = font.outline_glyph(glyph.clone()) {
            let bounds = outlined.px_bounds();
            min_x = min_x.min(bounds.min.x);
            min_y = min_y.min(bounds.min.y);
            max_x = max_x.max(bounds.max.x);
            max_y = max_y.max(bounds.max.y);
        }
    }

    // Whitespace-only or unoutlineable input.
    if min_x == f32::INFINITY {
        return Pixmap::new(1, 1).expect("pixmap");
    }

    let width = (max_x.ceil() - min_x.floor()).max(1.0) as u32;
    let height = (max_y.ceil() - min_y.floor()).max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height).expect("pixmap");

    let stride = pixmap.width() as usize;
    let rgba = [
        (color.red() * 255.0) as u8,
        (color.green() * 255.0) as u8,
        (color.blue() * 255.0) as u8,
        (color.alpha() * 255.0) as u8,
    ];
    let pixels = pixmap.pixels_mut();

    for glyph in &glyphs {
        if let Some(outlined) = font.outline_glyph(glyph.clone()) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                if coverage <= f32::EPSILON {
                    return;
                }
                let ix = (x as f32 + bounds.min.x - min_x).floor() as i32;
                let iy = (y as f32 + bounds.min.y - min_y).floor() as i32;
                if ix < 0 || iy < 0 || ix >= width as i32 || iy >= height as i32 {
                    return;
                }

                let alpha = (coverage * rgba[3] as f32 / 255.0).clamp(0.0, 1.0);
                let premul = PremultipliedColorU8::from_rgba(
                    (rgba[0] as f32 * alpha) as u8,
                    (rgba[1] as f32 * alpha) as u8,
                    (rgba[2] as f32 * alpha) as u8,
                    (alpha * 255.0) as u8,
                );
                let index = iy as usize * stride + ix as usize;
                if let Some(premul) = premul {
                    // Adjacent glyph boxes can overlap; keep the heavier
                    // coverage.
                    if premul.alpha() > pixels[index].alpha() {
                        pixels[index] = premul;
                    }
                }
            });
        }
    }

    pixmap
}
