// Pixel-level effects applied after the text is drawn

use image::{Rgba, RgbaImage};
use rand::Rng;

use super::color::blend_over;

const FOG: Rgba<u8> = Rgba([200, 200, 200, 40]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const GLITCH_SLICES: usize = 5;
const GLITCH_MAX_SLICE_HEIGHT: u32 = 10;
const SPARKLE_COUNT: usize = 50;

/// Washes the whole canvas with light grey
///
/// The fog colour is a premultiplied source: `out = fog + dst * (1 - fog.a)`,
/// each premultiplied channel saturating at 255.
pub fn fog(canvas: &mut RgbaImage) {
    for pixel in canvas.pixels_mut() {
        *pixel = add_premultiplied(*pixel, FOG);
    }
}

fn add_premultiplied(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let da = dst[3] as u32;
    let inv = 255 - src[3] as u32;
    let out_a = src[3] as u32 + (da * inv + 127) / 255;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let dst_pm = (dst[i] as u32 * da + 127) / 255;
        let out_pm = (src[i] as u32 + (dst_pm * inv + 127) / 255).min(255);
        // back to straight alpha
        ((out_pm * 255 + out_a / 2) / out_a).min(255) as u8
    };

    Rgba([channel(0), channel(1), channel(2), out_a as u8])
}

/// Copies a few random horizontal slices back onto the canvas, shifted
///
/// Each slice starts in the left half, is up to 9 rows tall and is moved
/// by -5..=4 horizontally and -2..=2 vertically.
pub fn glitch<R: Rng + ?Sized>(canvas: &mut RgbaImage, rng: &mut R) {
    let (w, h) = canvas.dimensions();
    if w < 2 || h == 0 {
        return;
    }

    for _ in 0..GLITCH_SLICES {
        let x = rng.random_range(0..w / 2);
        let y = rng.random_range(0..h);
        let sw = rng.random_range(0..w - x);
        let sh = rng.random_range(0..GLITCH_MAX_SLICE_HEIGHT);
        let dx = rng.random_range(0..10) as i32 - 5;
        let dy = rng.random_range(0..5) as i32 - 2;

        let sh = sh.min(h - y);
        let slice: Vec<(u32, u32, Rgba<u8>)> = (y..y + sh)
            .flat_map(|sy| (x..x + sw).map(move |sx| (sx, sy)))
            .map(|(sx, sy)| (sx, sy, *canvas.get_pixel(sx, sy)))
            .collect();

        for (sx, sy, src) in slice {
            let tx = sx as i32 + dx;
            let ty = sy as i32 + dy;
            if tx < 0 || ty < 0 || tx >= w as i32 || ty >= h as i32 {
                continue;
            }
            let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_over(*dst, src);
        }
    }
}

/// Sets a handful of random pixels to opaque white
pub fn sparkle<R: Rng + ?Sized>(canvas: &mut RgbaImage, rng: &mut R) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    for _ in 0..SPARKLE_COUNT {
        let x = rng.random_range(0..w);
        let y = rng.random_range(0..h);
        canvas.put_pixel(x, y, WHITE);
    }
}

/// 3x3 box blur with edge pixels clamped
pub fn box_blur(canvas: &RgbaImage) -> RgbaImage {
    let (w, h) = canvas.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let mut sum = [0u32; 4];
        for oy in -1i32..=1 {
            for ox in -1i32..=1 {
                let sx = (x as i32 + ox).clamp(0, w as i32 - 1) as u32;
                let sy = (y as i32 + oy).clamp(0, h as i32 - 1) as u32;
                let p = canvas.get_pixel(sx, sy);
                for (acc, v) in sum.iter_mut().zip(p.0) {
                    *acc += v as u32;
                }
            }
        }
        Rgba(sum.map(|v| ((v + 4) / 9) as u8))
    })
}

/// Rotates a layer about its centre by `radians`, nearest neighbour
///
/// Pixels that map from outside the source come out fully transparent.
pub fn rotate(layer: &RgbaImage, radians: f32) -> RgbaImage {
    let (w, h) = layer.dimensions();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let (sin, cos) = radians.sin_cos();

    RgbaImage::from_fn(w, h, |x, y| {
        // inverse mapping from destination back into the source
        let rx = x as f32 + 0.5 - cx;
        let ry = y as f32 + 0.5 - cy;
        let sx = (rx * cos + ry * sin + cx).floor();
        let sy = (-rx * sin + ry * cos + cy).floor();

        if sx < 0.0 || sy < 0.0 || sx >= w as f32 || sy >= h as f32 {
            Rgba([0, 0, 0, 0])
        } else {
            *layer.get_pixel(sx as u32, sy as u32)
        }
    })
}

/// Composites `layer` over `canvas`; both must be the same size
pub fn composite(canvas: &mut RgbaImage, layer: &RgbaImage) {
    for (dst, src) in canvas.pixels_mut().zip(layer.pixels()) {
        *dst = blend_over(*dst, *src);
    }
}
