//! Styles and variables: the two kinds of token the host can define.

use serde::{Deserialize, Serialize};

use super::identifiers::{StyleId, VariableId};
use super::paint::{Paint, Rgba};
use super::text::TextProps;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleKind {
    Paint { paints: Vec<Paint> },
    Text { text: TextProps },
}

/// A named, reusable paint or text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub id: StyleId,
    pub name: String,
    /// Imported from a library rather than defined in this document. Never
    /// offered by the local-style fallback.
    #[serde(default)]
    pub remote: bool,
    pub kind: StyleKind,
}

impl Style {
    pub fn paints(&self) -> Option<&[Paint]> {
        match &self.kind {
            StyleKind::Paint { paints } => Some(paints),
            StyleKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.kind {
            StyleKind::Text { text } => Some(text),
            StyleKind::Paint { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VariableValue {
    Color(Rgba),
    Float(f32),
    String(String),
    Boolean(bool),
}

/// A named design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub value: VariableValue,
}

impl Variable {
    pub fn color(&self) -> Option<Rgba> {
        match self.value {
            VariableValue::Color(color) => Some(color),
            _ => None,
        }
    }
}
