// 128x128 stamp thumbnails, one look per StampEffect

use image::{Rgba, RgbaImage};
use rand::Rng;

use super::effects;
use super::glyphs::{draw_text, text_width, GLYPH_SIZE};
use crate::domain::stamp::{Stamp, StampEffect};

pub const PREVIEW_SIZE: u32 = 128;
pub const PREVIEW_SCALE: u32 = 2;

const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 128]);
const SHADOW_OFFSET: i32 = 2;
const GLITCH_COLORS: [Rgba<u8>; 2] = [Rgba([255, 0, 0, 255]), Rgba([0, 255, 255, 255])];
const ROTATION_RADIANS: f32 = 0.1;

/// Renders a persisted stamp with its text centred and its effect applied
pub fn render_stamp<R: Rng + ?Sized>(stamp: &Stamp, rng: &mut R) -> RgbaImage {
    let background = Rgba(stamp.background_color.to_rgba());
    let color = Rgba(stamp.text_color.to_rgba());
    let text = stamp.text.as_str();

    let mut canvas = RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, background);
    let (x, y) = centred_origin(text);

    match stamp.selected_effect {
        StampEffect::None => {
            draw_text(&mut canvas, text, x, y, color, PREVIEW_SCALE);
        }
        StampEffect::Shadow => {
            let mut shadow = transparent_layer();
            draw_text(
                &mut shadow,
                text,
                x + SHADOW_OFFSET,
                y + SHADOW_OFFSET,
                SHADOW,
                PREVIEW_SCALE,
            );
            effects::composite(&mut canvas, &effects::box_blur(&shadow));
            draw_text(&mut canvas, text, x, y, color, PREVIEW_SCALE);
        }
        StampEffect::Jitter => {
            for _ in 0..5 {
                let dx = rng.random_range(-2..=2);
                let dy = rng.random_range(-2..=2);
                draw_text(&mut canvas, text, x + dx, y + dy, color, PREVIEW_SCALE);
            }
        }
        StampEffect::Glitch => {
            for i in 0..5 {
                let dx = rng.random_range(-5..=5);
                let dy = rng.random_range(-5..=5);
                let tint = GLITCH_COLORS[i % 2];
                draw_text(&mut canvas, text, x + dx, y + dy, tint, PREVIEW_SCALE);
            }
            draw_text(&mut canvas, text, x, y, color, PREVIEW_SCALE);
        }
        StampEffect::Rotate => {
            let mut layer = transparent_layer();
            draw_text(&mut layer, text, x, y, color, PREVIEW_SCALE);
            effects::composite(&mut canvas, &effects::rotate(&layer, ROTATION_RADIANS));
        }
        StampEffect::Blur => {
            draw_text(&mut canvas, text, x, y, color, PREVIEW_SCALE);
            canvas = effects::box_blur(&canvas);
        }
    }

    canvas
}

fn transparent_layer() -> RgbaImage {
    RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, Rgba([0, 0, 0, 0]))
}

/// Top-left corner that centres `text` on the preview; may be negative
fn centred_origin(text: &str) -> (i32, i32) {
    let width = text_width(text, PREVIEW_SCALE) as i32;
    let height = (GLYPH_SIZE * PREVIEW_SCALE) as i32;
    let size = PREVIEW_SIZE as i32;
    ((size - width) / 2, (size - height) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stamp::{HexColor, Language, NewStamp};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn stamp(text: &str, effect: StampEffect) -> Stamp {
        let new = NewStamp::new(
            text,
            Language::Japanese,
            HexColor::new("#ffffff").unwrap(),
            HexColor::new("#000000").unwrap(),
            effect,
        )
        .unwrap();
        Stamp::from_new(1, new, Utc::now())
    }

    fn render(text: &str, effect: StampEffect) -> RgbaImage {
        render_stamp(&stamp(text, effect), &mut StdRng::seed_from_u64(11))
    }

    fn bounding_box(canvas: &RgbaImage, want: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == want)
            .fold(None, |acc, (x, y, _)| match acc {
                None => Some((x, y, x, y)),
                Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
            })
    }

    #[test]
    fn every_effect_renders_at_preview_size() {
        for effect in StampEffect::ALL {
            let canvas = render("HI", effect);
            assert_eq!(canvas.dimensions(), (PREVIEW_SIZE, PREVIEW_SIZE), "{}", effect);
        }
    }

    #[test]
    fn plain_text_is_centred() {
        let canvas = render("HI", StampEffect::None);
        let (x0, y0, x1, y1) = bounding_box(&canvas, WHITE).expect("text drawn");

        // "HI" occupies a 32x16 cell at (48, 56)
        assert!(x0 >= 48 && x1 < 80);
        assert!(y0 >= 56 && y1 < 72);
    }

    #[test]
    fn background_stays_in_the_corners() {
        for effect in StampEffect::ALL {
            let canvas = render("HI", effect);
            assert_eq!(*canvas.get_pixel(0, 0), BLACK, "{}", effect);
        }
    }

    #[test]
    fn shadow_keeps_text_on_top() {
        let canvas = render("HI", StampEffect::Shadow);
        assert!(canvas.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn glitch_adds_tinted_copies() {
        let canvas = render("HI", StampEffect::Glitch);
        assert!(canvas.pixels().any(|p| *p == GLITCH_COLORS[0] || *p == GLITCH_COLORS[1]));
        assert!(canvas.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn blur_softens_text_edges() {
        let canvas = render("HI", StampEffect::Blur);
        assert!(canvas.pixels().any(|p| p[0] > 0 && p[0] < 255));
    }

    #[test]
    fn rotate_differs_from_plain() {
        let plain = render("HELLO", StampEffect::None);
        let rotated = render("HELLO", StampEffect::Rotate);
        assert_ne!(plain, rotated);
    }

    #[test]
    fn jitter_covers_more_than_a_single_draw() {
        let plain = render("HI", StampEffect::None);
        let plain_count = plain.pixels().filter(|p| **p == WHITE).count();
        let (px0, py0, px1, py1) = bounding_box(&plain, WHITE).expect("text drawn");

        for seed in 0..4 {
            let jittered = render_stamp(
                &stamp("HI", StampEffect::Jitter),
                &mut StdRng::seed_from_u64(seed),
            );
            let count = jittered.pixels().filter(|p| **p == WHITE).count();
            assert!(count > plain_count, "seed {}: {} <= {}", seed, count, plain_count);

            // every copy stays within two pixels of the plain draw
            let (x0, y0, x1, y1) = bounding_box(&jittered, WHITE).expect("text drawn");
            assert!(x0 + 2 >= px0 && y0 + 2 >= py0, "seed {}", seed);
            assert!(x1 <= px1 + 2 && y1 <= py1 + 2, "seed {}", seed);
        }
    }

    #[test]
    fn overly_wide_text_is_clipped_not_panicking() {
        let canvas = render(&"W".repeat(64), StampEffect::Jitter);
        assert!(canvas.pixels().any(|p| *p == WHITE));
    }
}
