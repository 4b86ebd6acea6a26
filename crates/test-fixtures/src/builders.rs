//! Terse constructors for scene nodes, paints, styles and variables.

use tokenscope_core::types::{
    ColorStop, FontName, GradientKind, NodeId, NodeKind, Paint, PaintSet, Rgba, SceneNode,
    ShapeKind, Style, StyleBinding, StyleId, StyleKind, TextProps, Variable, VariableId,
    VariableValue,
};

/// Parse `#RRGGBB` into channel floats.
///
/// # Panics
/// Panics on malformed input; fixtures are hand-written.
pub fn rgb(hex: &str) -> Rgba {
    let hex = hex.trim_start_matches('#');
    assert_eq!(hex.len(), 6, "expected #RRGGBB, got {hex}");
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).expect("hex digit") as f32 / 255.0
    };
    Rgba::rgb(channel(0), channel(2), channel(4))
}

pub fn solid(hex: &str) -> Paint {
    Paint::solid(rgb(hex))
}

pub fn solid_bound(hex: &str, variable: &str) -> Paint {
    Paint::Solid {
        color: rgb(hex),
        opacity: 1.0,
        visible: true,
        bound_variable: Some(VariableId::new(variable)),
    }
}

pub fn linear_gradient(from: &str, to: &str) -> Paint {
    Paint::Gradient {
        kind: GradientKind::Linear,
        stops: vec![
            ColorStop {
                position: 0.0,
                color: rgb(from),
            },
            ColorStop {
                position: 1.0,
                color: rgb(to),
            },
        ],
        visible: true,
    }
}

fn node(id: &str, kind: NodeKind) -> SceneNode {
    SceneNode {
        id: NodeId::new(id),
        name: id.to_string(),
        visible: true,
        parent: None,
        children: Vec::new(),
        kind,
    }
}

pub fn frame(id: &str) -> SceneNode {
    node(
        id,
        NodeKind::Frame {
            paints: PaintSet::default(),
        },
    )
}

pub fn section(id: &str) -> SceneNode {
    node(
        id,
        NodeKind::Section {
            paints: PaintSet::default(),
        },
    )
}

pub fn group(id: &str) -> SceneNode {
    node(id, NodeKind::Group)
}

pub fn rect(id: &str, fills: Vec<Paint>) -> SceneNode {
    node(
        id,
        NodeKind::Shape {
            shape: ShapeKind::Rectangle,
            paints: PaintSet {
                fills,
                ..PaintSet::default()
            },
        },
    )
}

pub fn text(id: &str, family: &str, style: &str, size: f32) -> SceneNode {
    node(
        id,
        NodeKind::Text {
            paints: PaintSet::default(),
            text: TextProps::new(FontName::new(family, style), size),
            text_style: StyleBinding::None,
        },
    )
}

pub fn hidden(mut node: SceneNode) -> SceneNode {
    node.visible = false;
    node
}

pub fn with_fills(mut node: SceneNode, fills: Vec<Paint>) -> SceneNode {
    if let Some(paints) = node.paints_mut() {
        paints.fills = fills;
    }
    node
}

pub fn with_strokes(mut node: SceneNode, strokes: Vec<Paint>) -> SceneNode {
    if let Some(paints) = node.paints_mut() {
        paints.strokes = strokes;
    }
    node
}

pub fn with_fill_style(mut node: SceneNode, style: &str) -> SceneNode {
    if let Some(paints) = node.paints_mut() {
        paints.fill_style = StyleBinding::Style(StyleId::new(style));
    }
    node
}

pub fn with_stroke_style(mut node: SceneNode, style: &str) -> SceneNode {
    if let Some(paints) = node.paints_mut() {
        paints.stroke_style = StyleBinding::Style(StyleId::new(style));
    }
    node
}

pub fn with_text_style(mut node: SceneNode, style: &str) -> SceneNode {
    if let NodeKind::Text { text_style, .. } = &mut node.kind {
        *text_style = StyleBinding::Style(StyleId::new(style));
    }
    node
}

pub fn with_font_weight(mut node: SceneNode, weight: u16) -> SceneNode {
    if let NodeKind::Text { text, .. } = &mut node.kind {
        text.font_weight = Some(weight);
    }
    node
}

pub fn paint_style(id: &str, name: &str, hex: &str) -> Style {
    Style {
        id: StyleId::new(id),
        name: name.to_string(),
        remote: false,
        kind: StyleKind::Paint {
            paints: vec![solid(hex)],
        },
    }
}

pub fn text_style(id: &str, name: &str, family: &str, style: &str, size: f32) -> Style {
    Style {
        id: StyleId::new(id),
        name: name.to_string(),
        remote: false,
        kind: StyleKind::Text {
            text: TextProps::new(FontName::new(family, style), size),
        },
    }
}

pub fn color_variable(id: &str, name: &str, hex: &str) -> Variable {
    Variable {
        id: VariableId::new(id),
        name: name.to_string(),
        value: VariableValue::Color(rgb(hex)),
    }
}
