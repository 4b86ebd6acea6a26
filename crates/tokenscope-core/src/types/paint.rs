//! Paints, paint lists and style bindings.

use serde::{Deserialize, Serialize};

use super::identifiers::{StyleId, VariableId};

fn opaque() -> f32 {
    1.0
}

fn shown() -> bool {
    true
}

/// Color with channels in `0.0..=1.0`, as the host reports them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// One stop of a gradient paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

impl GradientKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Radial => "radial",
            Self::Angular => "angular",
            Self::Diamond => "diamond",
        }
    }
}

/// A single entry of a fill or stroke list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Rgba,
        #[serde(default = "opaque")]
        opacity: f32,
        #[serde(default = "shown")]
        visible: bool,
        /// Variable bound to the color channel, if any.
        #[serde(default)]
        bound_variable: Option<VariableId>,
    },
    Gradient {
        kind: GradientKind,
        stops: Vec<ColorStop>,
        #[serde(default = "shown")]
        visible: bool,
    },
    Image {
        #[serde(default = "shown")]
        visible: bool,
    },
    Video {
        #[serde(default = "shown")]
        visible: bool,
    },
    Pattern {
        #[serde(default = "shown")]
        visible: bool,
    },
}

impl Paint {
    /// An unbound, visible, fully opaque solid paint.
    pub fn solid(color: Rgba) -> Self {
        Self::Solid {
            color,
            opacity: 1.0,
            visible: true,
            bound_variable: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Self::Solid { visible, .. }
            | Self::Gradient { visible, .. }
            | Self::Image { visible }
            | Self::Video { visible }
            | Self::Pattern { visible } => *visible,
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient { .. })
    }

    /// Variable bound to the color channel. Only solids carry one.
    pub fn bound_variable(&self) -> Option<&VariableId> {
        match self {
            Self::Solid { bound_variable, .. } => bound_variable.as_ref(),
            _ => None,
        }
    }

    /// Copy of this paint with any color-channel variable binding removed.
    pub fn detached(&self) -> Self {
        match self {
            Self::Solid {
                color,
                opacity,
                visible,
                ..
            } => Self::Solid {
                color: *color,
                opacity: *opacity,
                visible: *visible,
                bound_variable: None,
            },
            other => other.clone(),
        }
    }
}

/// A style slot binding as the host reports it.
///
/// `Mixed` is what the host returns for a text node whose ranges carry
/// different styles; it never counts as a token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum StyleBinding {
    #[default]
    None,
    Mixed,
    Style(StyleId),
}

impl StyleBinding {
    /// The bound style id, if the binding is a single non-empty style.
    pub fn style_id(&self) -> Option<&StyleId> {
        match self {
            Self::Style(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    pub fn from_option(id: Option<StyleId>) -> Self {
        id.map_or(Self::None, Self::Style)
    }
}

/// Which paint list of a node an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintSlot {
    Fill,
    Stroke,
}

impl PaintSlot {
    pub fn from_is_stroke(is_stroke: bool) -> Self {
        if is_stroke {
            Self::Stroke
        } else {
            Self::Fill
        }
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Stroke)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }
}

/// Which style binding of a node an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSlot {
    Fill,
    Stroke,
    Text,
}

impl From<PaintSlot> for StyleSlot {
    fn from(slot: PaintSlot) -> Self {
        match slot {
            PaintSlot::Fill => Self::Fill,
            PaintSlot::Stroke => Self::Stroke,
        }
    }
}

/// Fills, strokes and their style bindings, carried by every node kind
/// that can be painted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSet {
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub fill_style: StyleBinding,
    pub stroke_style: StyleBinding,
}

impl PaintSet {
    pub fn paints(&self, slot: PaintSlot) -> &[Paint] {
        match slot {
            PaintSlot::Fill => &self.fills,
            PaintSlot::Stroke => &self.strokes,
        }
    }

    pub fn paints_mut(&mut self, slot: PaintSlot) -> &mut Vec<Paint> {
        match slot {
            PaintSlot::Fill => &mut self.fills,
            PaintSlot::Stroke => &mut self.strokes,
        }
    }

    pub fn binding(&self, slot: PaintSlot) -> &StyleBinding {
        match slot {
            PaintSlot::Fill => &self.fill_style,
            PaintSlot::Stroke => &self.stroke_style,
        }
    }

    pub fn binding_mut(&mut self, slot: PaintSlot) -> &mut StyleBinding {
        match slot {
            PaintSlot::Fill => &mut self.fill_style,
            PaintSlot::Stroke => &mut self.stroke_style,
        }
    }
}
