use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value_objects::{HexColor, Language, StampEffect};

/// Longest stamp text accepted
pub const MAX_STAMP_TEXT_CHARS: usize = 64;

/// A stamp that has not been persisted yet
///
/// # Invariants
/// - Text is non-empty after trimming
/// - Text is at most 64 characters
///
/// # Example
/// ```
/// use stamp_api::domain::stamp::{HexColor, Language, NewStamp, StampEffect};
///
/// let stamp = NewStamp::new(
///     "HELLO",
///     Language::Japanese,
///     HexColor::new("#ffffff").unwrap(),
///     HexColor::new("#000000").unwrap(),
///     StampEffect::Glitch,
/// ).expect("valid stamp");
///
/// assert_eq!(stamp.text(), "HELLO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStamp {
    text: String,
    language: Language,
    text_color: HexColor,
    background_color: HexColor,
    selected_effect: StampEffect,
}

impl NewStamp {
    pub fn new(
        text: impl Into<String>,
        language: Language,
        text_color: HexColor,
        background_color: HexColor,
        selected_effect: StampEffect,
    ) -> Result<Self, String> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err("Text cannot be empty".to_string());
        }
        if text.chars().count() > MAX_STAMP_TEXT_CHARS {
            return Err(format!(
                "Text must be at most {} characters",
                MAX_STAMP_TEXT_CHARS
            ));
        }

        Ok(Self {
            text,
            language,
            text_color,
            background_color,
            selected_effect,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text_color(&self) -> &HexColor {
        &self.text_color
    }

    pub fn background_color(&self) -> &HexColor {
        &self.background_color
    }

    pub fn selected_effect(&self) -> StampEffect {
        self.selected_effect
    }
}

/// A persisted stamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamp {
    pub id: i64,
    pub text: String,
    pub language: Language,
    pub text_color: HexColor,
    pub background_color: HexColor,
    pub selected_effect: StampEffect,
    pub created_at: DateTime<Utc>,
}

impl Stamp {
    /// Attaches storage-assigned fields to a validated stamp
    pub fn from_new(id: i64, stamp: NewStamp, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: stamp.text,
            language: stamp.language,
            text_color: stamp.text_color,
            background_color: stamp.background_color,
            selected_effect: stamp.selected_effect,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> (HexColor, HexColor) {
        (
            HexColor::new("#ffffff").unwrap(),
            HexColor::new("#000000").unwrap(),
        )
    }

    #[test]
    fn create_valid_stamp() {
        let (fg, bg) = colors();
        let stamp = NewStamp::new("こんにちは", Language::Japanese, fg, bg, StampEffect::None)
            .expect("valid stamp");

        assert_eq!(stamp.text(), "こんにちは");
        assert_eq!(stamp.selected_effect(), StampEffect::None);
    }

    #[test]
    fn blank_text_rejected() {
        let (fg, bg) = colors();
        let result = NewStamp::new("   ", Language::Japanese, fg, bg, StampEffect::None);
        assert_eq!(result.unwrap_err(), "Text cannot be empty");
    }

    #[test]
    fn long_text_rejected() {
        let (fg, bg) = colors();
        let text = "x".repeat(MAX_STAMP_TEXT_CHARS + 1);
        assert!(NewStamp::new(text, Language::Chinese, fg, bg, StampEffect::Blur).is_err());
    }

    #[test]
    fn persisted_stamp_serializes_camel_case() {
        let (fg, bg) = colors();
        let new = NewStamp::new("HELLO", Language::Chinese, fg, bg, StampEffect::Rotate).unwrap();
        let stamp = Stamp::from_new(3, new, Utc::now());

        let json = serde_json::to_value(&stamp).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["textColor"], "#ffffff");
        assert_eq!(json["backgroundColor"], "#000000");
        assert_eq!(json["selectedEffect"], "rotate");
        assert_eq!(json["language"], "chinese");
        assert!(json["createdAt"].is_string());
    }
}
