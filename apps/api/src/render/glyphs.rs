// 8x8 bitmap text drawn straight onto the canvas

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS};
use image::{Rgba, RgbaImage};

use super::color::blend_over;

/// Glyph cell edge in font pixels
pub const GLYPH_SIZE: u32 = 8;

/// Looks up the bitmap for `c`; `None` when no bundled font covers it
pub fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .or_else(|| HIRAGANA_FONTS.get(c))
}

/// Width in canvas pixels of `text` at `scale`
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Draws `text` with its top-left corner at (`x`, `top`)
///
/// Each font pixel becomes a `scale` x `scale` block blended source-over.
/// Anything outside the canvas is clipped; characters without a glyph
/// still advance the pen.
pub fn draw_text(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    top: i32,
    color: Rgba<u8>,
    scale: u32,
) {
    let scale = scale.max(1) as i32;
    let advance = GLYPH_SIZE as i32 * scale;

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let origin_x = x + i as i32 * advance;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_SIZE as i32 {
                // bit 0 is the leftmost pixel
                if bits & (1 << col) == 0 {
                    continue;
                }
                fill_block(
                    canvas,
                    origin_x + col * scale,
                    top + row as i32 * scale,
                    scale,
                    color,
                );
            }
        }
    }
}

fn fill_block(canvas: &mut RgbaImage, x: i32, y: i32, size: i32, color: Rgba<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for py in y.max(0)..(y + size).min(h) {
        for px in x.max(0)..(x + size).min(w) {
            let dst = canvas.get_pixel_mut(px as u32, py as u32);
            *dst = blend_over(*dst, color);
        }
    }
}
