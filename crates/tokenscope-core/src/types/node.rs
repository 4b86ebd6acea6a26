//! Scene nodes as a closed sum type over the kinds the engine understands.
//!
//! Capabilities are carried by the variant: only variants with a `PaintSet`
//! can be painted, only `Text` has typography, and only the four container
//! kinds can root an analysis.

use serde::{Deserialize, Serialize};

use super::identifiers::NodeId;
use super::paint::{PaintSet, StyleBinding};
use super::text::TextProps;

fn shown() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    BooleanOperation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Frame {
        #[serde(default)]
        paints: PaintSet,
    },
    Component {
        #[serde(default)]
        paints: PaintSet,
    },
    Instance {
        #[serde(default)]
        paints: PaintSet,
    },
    Section {
        #[serde(default)]
        paints: PaintSet,
    },
    Group,
    Shape {
        shape: ShapeKind,
        #[serde(default)]
        paints: PaintSet,
    },
    Text {
        #[serde(default)]
        paints: PaintSet,
        text: TextProps,
        #[serde(default)]
        text_style: StyleBinding,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frame { .. } => "frame",
            Self::Component { .. } => "component",
            Self::Instance { .. } => "instance",
            Self::Section { .. } => "section",
            Self::Group => "group",
            Self::Shape { .. } => "shape",
            Self::Text { .. } => "text",
        }
    }
}

/// A node snapshot read from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "shown")]
    pub visible: bool,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl SceneNode {
    /// Frames, components, instances and sections can own an analyzed subtree.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Frame { .. }
                | NodeKind::Component { .. }
                | NodeKind::Instance { .. }
                | NodeKind::Section { .. }
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    pub fn paints(&self) -> Option<&PaintSet> {
        match &self.kind {
            NodeKind::Frame { paints }
            | NodeKind::Component { paints }
            | NodeKind::Instance { paints }
            | NodeKind::Section { paints }
            | NodeKind::Shape { paints, .. }
            | NodeKind::Text { paints, .. } => Some(paints),
            NodeKind::Group => None,
        }
    }

    pub fn paints_mut(&mut self) -> Option<&mut PaintSet> {
        match &mut self.kind {
            NodeKind::Frame { paints }
            | NodeKind::Component { paints }
            | NodeKind::Instance { paints }
            | NodeKind::Section { paints }
            | NodeKind::Shape { paints, .. }
            | NodeKind::Text { paints, .. } => Some(paints),
            NodeKind::Group => None,
        }
    }

    /// Typography and text-style binding, for text nodes only.
    pub fn text(&self) -> Option<(&TextProps, &StyleBinding)> {
        match &self.kind {
            NodeKind::Text {
                text, text_style, ..
            } => Some((text, text_style)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frame_with_defaults() {
        let node: SceneNode =
            serde_json::from_str(r#"{"id":"1:1","kind":{"type":"frame"}}"#).unwrap();
        assert!(node.visible);
        assert!(node.is_container());
        assert!(node.paints().unwrap().fills.is_empty());
    }

    #[test]
    fn groups_are_not_paintable_containers() {
        let node: SceneNode =
            serde_json::from_str(r#"{"id":"1:2","kind":{"type":"group"}}"#).unwrap();
        assert!(!node.is_container());
        assert!(node.paints().is_none());
        assert!(node.text().is_none());
    }
}
