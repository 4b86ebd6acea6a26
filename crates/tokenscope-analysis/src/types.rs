//! Analysis results and suggestion tokens, serialized the way the UI panel
//! reads them (camelCase fields).

use serde::{Deserialize, Serialize};
use tokenscope_core::types::{FontName, LetterSpacing, LineHeight, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintKind {
    Solid,
    Gradient,
}

/// One non-compliant paint on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintOccurrence {
    pub node_id: NodeId,
    pub node_name: String,
    pub paint_kind: PaintKind,
    /// Hex for solids, content signature for gradients.
    pub color_value: String,
    pub is_stroke: bool,
}

/// Occurrences sharing `(color_value, is_stroke)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGroup {
    pub label: String,
    pub color_value: String,
    pub is_stroke: bool,
    pub occurrences: Vec<PaintOccurrence>,
}

/// One text node without a text-style binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyOccurrence {
    pub node_id: NodeId,
    pub node_name: String,
    pub font_family: String,
    pub font_style: String,
    pub readable_weight: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
}

/// Occurrences sharing the raw `(family, style)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyGroup {
    pub style: FontName,
    pub label: String,
    pub occurrences: Vec<TypographyOccurrence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Style,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorToken {
    /// Display name, prefix and markers stripped.
    pub name: String,
    pub hex: String,
    pub id: String,
    pub source: TokenSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub name: String,
    pub id: String,
    pub font_family: String,
    pub font_style: String,
    pub font_size: f32,
}
