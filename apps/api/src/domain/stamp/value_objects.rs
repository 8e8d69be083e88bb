use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual effect a stamp is rendered with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampEffect {
    #[default]
    None,
    Glitch,
    Jitter,
    Rotate,
    Shadow,
    Blur,
}

impl StampEffect {
    pub const ALL: [StampEffect; 6] = [
        StampEffect::None,
        StampEffect::Glitch,
        StampEffect::Jitter,
        StampEffect::Rotate,
        StampEffect::Shadow,
        StampEffect::Blur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StampEffect::None => "none",
            StampEffect::Glitch => "glitch",
            StampEffect::Jitter => "jitter",
            StampEffect::Rotate => "rotate",
            StampEffect::Shadow => "shadow",
            StampEffect::Blur => "blur",
        }
    }
}

impl fmt::Display for StampEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StampEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| format!("Unknown effect: {}", s))
    }
}

/// Script the stamp text is written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Japanese,
    Chinese,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Japanese => "japanese",
            Language::Chinese => "chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "japanese" => Ok(Language::Japanese),
            "chinese" => Ok(Language::Chinese),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

/// CSS hex colour value object
///
/// # Invariants
/// - Starts with `#`
/// - Followed by 3, 6 or 8 hex digits
/// - Stored in lowercase
///
/// # Example
/// ```
/// use stamp_api::domain::stamp::HexColor;
///
/// let color = HexColor::new("#FFF").expect("valid colour");
/// assert_eq!(color.as_str(), "#fff");
/// assert_eq!(color.to_rgba(), [255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl AsRef<str>) -> Result<Self, String> {
        let value = value.as_ref().trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| format!("Invalid colour: {}", value))?;

        let valid_len = matches!(digits.len(), 3 | 6 | 8);
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid colour: {}", value));
        }

        Ok(HexColor(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to `[r, g, b, a]`; colours without an alpha pair are opaque
    pub fn to_rgba(&self) -> [u8; 4] {
        let digits = &self.0[1..];
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
        let pair = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);

        match digits.len() {
            3 => [nibble(0) * 17, nibble(1) * 17, nibble(2) * 17, 255],
            6 => [pair(0), pair(2), pair(4), 255],
            _ => [pair(0), pair(2), pair(4), pair(6)],
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::new(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_round_trips_through_str() {
        for effect in StampEffect::ALL {
            assert_eq!(effect.as_str().parse::<StampEffect>().unwrap(), effect);
        }
    }

    #[test]
    fn unknown_effect_rejected() {
        assert!("sparkle".parse::<StampEffect>().is_err());
        assert!("Glitch".parse::<StampEffect>().is_err());
    }

    #[test]
    fn effect_serializes_lowercase() {
        let json = serde_json::to_string(&StampEffect::Shadow).unwrap();
        assert_eq!(json, "\"shadow\"");
    }

    #[test]
    fn language_parsing() {
        assert_eq!("chinese".parse::<Language>().unwrap(), Language::Chinese);
        assert!("klingon".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Japanese);
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(HexColor::new("#0f8").unwrap().to_rgba(), [0, 255, 136, 255]);
    }

    #[test]
    fn long_hex_with_alpha() {
        let color = HexColor::new("#FF000080").unwrap();
        assert_eq!(color.as_str(), "#ff000080");
        assert_eq!(color.to_rgba(), [255, 0, 0, 128]);
    }

    #[test]
    fn invalid_hex_rejected() {
        assert!(HexColor::new("ffffff").is_err());
        assert!(HexColor::new("#ffff").is_err());
        assert!(HexColor::new("#gggggg").is_err());
        assert!(HexColor::new("").is_err());
    }

    #[test]
    fn hex_deserializes_with_validation() {
        let color: HexColor = serde_json::from_str("\"#ABCDEF\"").unwrap();
        assert_eq!(color.as_str(), "#abcdef");
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
    }
}
