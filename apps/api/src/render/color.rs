use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::domain::stamp::HexColor;

/// Colour as sent by clients of the image generator
///
/// Deserializes from either `{"r":..,"g":..,"b":..,"a":..}` or a hex string
/// such as `"#ff8800"`. An object without `a` is opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Channels {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
    Hex(HexColor),
}

fn opaque() -> u8 {
    255
}

impl From<ColorRepr> for RgbaColor {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Channels { r, g, b, a } => RgbaColor { r, g, b, a },
            ColorRepr::Hex(hex) => hex.to_rgba().into(),
        }
    }
}

impl From<[u8; 4]> for RgbaColor {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        RgbaColor { r, g, b, a }
    }
}

impl From<RgbaColor> for Rgba<u8> {
    fn from(c: RgbaColor) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

/// Composites `src` over `dst` (Porter-Duff source-over, straight alpha)
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = dst[3] as u32;
    let inv = 255 - sa;
    // output alpha scaled by 255
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let num = src[i] as u32 * sa * 255 + dst[i] as u32 * da * inv;
        ((num + out_a / 2) / out_a) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        ((out_a + 127) / 255) as u8,
    ])
}
