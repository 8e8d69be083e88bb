// Text image generator behind POST /api/generate

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use rand::Rng;
use serde::Deserialize;

use super::color::RgbaColor;
use super::effects;
use super::glyphs::{draw_text, GLYPH_SIZE};

pub const CANVAS_WIDTH: u32 = 256;
pub const CANVAS_HEIGHT: u32 = 256;

/// Left edge of the text
pub const TEXT_X: i32 = 20;
pub const TEXT_SCALE: u32 = 2;

/// Body of an image generation request
///
/// Every field is optional; a missing colour is transparent black.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectRequest {
    pub text: String,
    pub text_color: RgbaColor,
    pub background_color: RgbaColor,
    pub language: String,
    /// Effect name to on/off; only `fog`, `glitch` and `sparkle` are known
    pub effect: HashMap<String, bool>,
}

impl EffectRequest {
    fn enabled(&self, name: &str) -> bool {
        self.effect.get(name).copied().unwrap_or(false)
    }
}

/// Renders the request onto a fresh 256x256 canvas
///
/// The background replaces the canvas outright (alpha included), the text
/// baseline sits on the vertical middle, and enabled effects run as fog,
/// then glitch, then sparkle.
pub fn generate_image<R: Rng + ?Sized>(req: &EffectRequest, rng: &mut R) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        Rgba::from(req.background_color),
    );

    let baseline = (CANVAS_HEIGHT / 2) as i32;
    let top = baseline - (GLYPH_SIZE * TEXT_SCALE) as i32;
    draw_text(
        &mut canvas,
        &req.text,
        TEXT_X,
        top,
        Rgba::from(req.text_color),
        TEXT_SCALE,
    );

    if req.enabled("fog") {
        effects::fog(&mut canvas);
    }
    if req.enabled("glitch") {
        effects::glitch(&mut canvas, rng);
    }
    if req.enabled("sparkle") {
        effects::sparkle(&mut canvas, rng);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(json: &str) -> EffectRequest {
        serde_json::from_str(json).expect("valid request")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_request_is_transparent() {
        let canvas = generate_image(&request("{}"), &mut rng());

        assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert!(canvas.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn background_fills_canvas() {
        let req = request(r#"{"backgroundColor": {"r": 10, "g": 20, "b": 30, "a": 255}}"#);
        let canvas = generate_image(&req, &mut rng());

        assert!(canvas.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn text_lands_above_the_baseline() {
        let req = request(
            r##"{"text": "HELLO", "textColor": "#ff0000", "backgroundColor": "#000000"}"##,
        );
        let canvas = generate_image(&req, &mut rng());

        let red: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == Rgba([255, 0, 0, 255]))
            .map(|(x, y, _)| (x, y))
            .collect();

        assert!(!red.is_empty());
        for (x, y) in red {
            assert!(x >= TEXT_X as u32);
            assert!((112..128).contains(&y));
        }
    }

    #[test]
    fn unknown_and_disabled_effects_are_ignored() {
        let plain =
            request(r##"{"text": "A", "textColor": "#ffffff", "backgroundColor": "#000000"}"##);
        let flagged = request(
            r##"{"text": "A", "textColor": "#ffffff", "backgroundColor": "#000000",
                "effect": {"fog": false, "sparkle": false, "wobble": true}}"##,
        );

        assert_eq!(
            generate_image(&plain, &mut rng()),
            generate_image(&flagged, &mut rng())
        );
    }

    #[test]
    fn fog_changes_the_background() {
        let req = request(r##"{"backgroundColor": "#000000", "effect": {"fog": true}}"##);
        let canvas = generate_image(&req, &mut rng());

        assert_eq!(*canvas.get_pixel(0, 0), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn sparkle_adds_white_pixels() {
        let req = request(r##"{"backgroundColor": "#000000", "effect": {"sparkle": true}}"##);
        let canvas = generate_image(&req, &mut rng());

        assert!(canvas.pixels().any(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn same_seed_same_image() {
        let req = request(
            r##"{"text": "GLITCH", "textColor": "#00ffff", "backgroundColor": "#202020",
                "effect": {"fog": true, "glitch": true, "sparkle": true}}"##,
        );

        assert_eq!(
            generate_image(&req, &mut StdRng::seed_from_u64(5)),
            generate_image(&req, &mut StdRng::seed_from_u64(5))
        );
    }
}
