//! Raster rendering for generated images and stamp previews
//!
//! Everything here works on an [`image::RgbaImage`] with straight
//! (non-premultiplied) alpha. Randomised effects take the generator as a
//! parameter so callers decide between `rand::rng()` and a seeded `StdRng`.

pub mod color;
pub mod effects;
pub mod generate;
pub mod glyphs;
pub mod stamp_preview;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

pub use color::RgbaColor;
pub use generate::{generate_image, EffectRequest};
pub use stamp_preview::render_stamp;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encodes a canvas as PNG bytes
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trip_keeps_pixels() {
        let mut canvas = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        canvas.put_pixel(1, 2, Rgba([255, 0, 0, 128]));

        let bytes = encode_png(&canvas).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, canvas);
    }
}
