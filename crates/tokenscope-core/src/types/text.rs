//! Typographic properties of text nodes and text styles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels(f32),
    Percent(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum LetterSpacing {
    Pixels(f32),
    Percent(f32),
}

impl Default for LetterSpacing {
    fn default() -> Self {
        Self::Percent(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// The full typographic property set of a text node or text style.
///
/// Several of these are only reliable after the node's font is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    pub font_name: FontName,
    pub font_size: f32,
    /// Numeric weight when the host reports one.
    #[serde(default)]
    pub font_weight: Option<u16>,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub text_case: TextCase,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub paragraph_spacing: f32,
    #[serde(default)]
    pub paragraph_indent: f32,
}

impl TextProps {
    /// Default-valued properties for the given font and size.
    pub fn new(font_name: FontName, font_size: f32) -> Self {
        Self {
            font_name,
            font_size,
            font_weight: None,
            line_height: LineHeight::default(),
            letter_spacing: LetterSpacing::default(),
            text_case: TextCase::default(),
            text_decoration: TextDecoration::default(),
            paragraph_spacing: 0.0,
            paragraph_indent: 0.0,
        }
    }
}
