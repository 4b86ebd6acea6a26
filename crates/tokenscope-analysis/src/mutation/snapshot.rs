//! Pre-edit node state, captured once per node per editing session.

use tracing::debug;

use tokenscope_core::types::collections::FxHashMap;
use tokenscope_core::types::{NodeId, Paint, PaintSlot, SceneNode, StyleBinding, TextProps};
use tokenscope_core::{HostDocument, HostError};

#[derive(Debug, Clone, PartialEq)]
pub struct TextSnapshot {
    pub props: TextProps,
    pub text_style: StyleBinding,
}

/// Everything needed to put a node back the way it looked before an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginalNodeState {
    pub node_id: NodeId,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub fill_style: StyleBinding,
    pub stroke_style: StyleBinding,
    pub text: Option<TextSnapshot>,
}

impl OriginalNodeState {
    pub fn of(node: &SceneNode) -> Self {
        let paints = node.paints().cloned().unwrap_or_default();
        Self {
            node_id: node.id.clone(),
            fills: paints.fills,
            strokes: paints.strokes,
            fill_style: paints.fill_style,
            stroke_style: paints.stroke_style,
            text: node.text().map(|(props, binding)| TextSnapshot {
                props: props.clone(),
                text_style: binding.clone(),
            }),
        }
    }

    pub fn paints(&self, slot: PaintSlot) -> &[Paint] {
        match slot {
            PaintSlot::Fill => &self.fills,
            PaintSlot::Stroke => &self.strokes,
        }
    }

    pub fn binding(&self, slot: PaintSlot) -> &StyleBinding {
        match slot {
            PaintSlot::Fill => &self.fill_style,
            PaintSlot::Stroke => &self.stroke_style,
        }
    }
}

/// At most one snapshot per node. A second capture for the same node is a
/// no-op, so the stored state is always the pre-edit one.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    states: FxHashMap<NodeId, OriginalNodeState>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `id` unless it already has a snapshot. Returns whether a new
    /// snapshot was stored. Text nodes get their font loaded first.
    pub async fn capture<H: HostDocument>(
        &mut self,
        host: &H,
        id: &NodeId,
    ) -> Result<bool, HostError> {
        if self.states.contains_key(id) {
            return Ok(false);
        }
        let node = host
            .node(id)
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
        if let Some((props, _)) = node.text() {
            if let Err(e) = host.load_font(&props.font_name).await {
                debug!(node_id = %id, error = %e, "font not loadable, snapshotting as reported");
            }
        }
        self.states.insert(id.clone(), OriginalNodeState::of(&node));
        Ok(true)
    }

    /// Capture every id that resolves. Returns how many new snapshots were stored.
    pub async fn capture_all<H: HostDocument>(&mut self, host: &H, ids: &[NodeId]) -> usize {
        let mut captured = 0;
        for id in ids {
            match self.capture(host, id).await {
                Ok(true) => captured += 1,
                Ok(false) => {}
                Err(e) => debug!(node_id = %id, error = %e, "skipping snapshot"),
            }
        }
        captured
    }

    pub fn get(&self, id: &NodeId) -> Option<&OriginalNodeState> {
        self.states.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.states.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
