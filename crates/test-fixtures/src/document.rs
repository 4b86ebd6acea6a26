//! An in-memory `HostDocument` with the host's binding semantics.

use std::cell::{Cell, RefCell};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use tokenscope_core::errors::HostError;
use tokenscope_core::traits::HostDocument;
use tokenscope_core::types::{
    FontName, NodeId, NodeKind, PageId, Paint, PaintSlot, SceneNode, Style, StyleBinding,
    StyleId, StyleKind, StyleSlot, TextProps, Variable, VariableId,
};

/// Serialized form of a document under `test-fixtures/documents/`.
///
/// Only `children` need to be spelled out; parents are derived.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFixture {
    pub page: String,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub unavailable_fonts: Vec<FontName>,
    #[serde(default)]
    pub selection: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    page: PageId,
    roots: Vec<NodeId>,
    nodes: FxHashMap<NodeId, SceneNode>,
    styles: FxHashMap<StyleId, Style>,
    style_order: Vec<StyleId>,
    variables: FxHashMap<VariableId, Variable>,
    unavailable_fonts: FxHashSet<FontName>,
    loaded_fonts: RefCell<FxHashSet<FontName>>,
    selection: Vec<NodeId>,
    viewport: Vec<NodeId>,
    style_lookups: Cell<usize>,
    selection_writes: usize,
}

fn not_found(id: &NodeId) -> HostError {
    HostError::NodeNotFound(id.to_string())
}

impl MemoryDocument {
    pub fn new(page: &str) -> Self {
        Self {
            page: PageId::new(page),
            ..Self::default()
        }
    }

    pub fn from_fixture(fixture: DocumentFixture) -> Self {
        let mut doc = Self::new(&fixture.page);
        let mut parents: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        for node in &fixture.nodes {
            for child in &node.children {
                parents.insert(child.clone(), node.id.clone());
            }
        }
        for mut node in fixture.nodes {
            node.parent = parents.get(&node.id).cloned();
            if node.parent.is_none() {
                doc.roots.push(node.id.clone());
            }
            doc.nodes.insert(node.id.clone(), node);
        }
        for style in fixture.styles {
            doc = doc.with_style(style);
        }
        for variable in fixture.variables {
            doc = doc.with_variable(variable);
        }
        doc.unavailable_fonts.extend(fixture.unavailable_fonts);
        doc.selection = fixture.selection;
        doc
    }

    /// Insert `node` under `parent` (or at page level), wiring both links.
    pub fn with_node(mut self, parent: Option<&str>, mut node: SceneNode) -> Self {
        match parent {
            Some(parent) => {
                let parent_id = NodeId::new(parent);
                node.parent = Some(parent_id.clone());
                if let Some(p) = self.nodes.get_mut(&parent_id) {
                    p.children.push(node.id.clone());
                }
            }
            None => {
                node.parent = None;
                self.roots.push(node.id.clone());
            }
        }
        self.nodes.insert(node.id.clone(), node);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        if !self.styles.contains_key(&style.id) {
            self.style_order.push(style.id.clone());
        }
        self.styles.insert(style.id.clone(), style);
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.insert(variable.id.clone(), variable);
        self
    }

    pub fn with_unavailable_font(mut self, font: FontName) -> Self {
        self.unavailable_fonts.insert(font);
        self
    }

    pub fn with_selection(mut self, ids: &[&str]) -> Self {
        self.selection = ids.iter().map(|id| NodeId::new(*id)).collect();
        self
    }

    /// Simulate the user picking nodes in the canvas.
    pub fn user_select(&mut self, ids: &[&str]) {
        self.selection = ids.iter().map(|id| NodeId::new(*id)).collect();
    }

    /// Simulate the user deleting a node (and its subtree).
    pub fn delete_node(&mut self, id: &str) {
        let id = NodeId::new(id);
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children.iter().map(|c| c.as_str().to_string()).collect::<Vec<_>>() {
                self.delete_node(&child);
            }
            if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
                parent.children.retain(|c| c != &id);
            }
        }
        self.roots.retain(|r| r != &id);
    }

    /// Simulate navigating to another page.
    pub fn switch_page(&mut self, page: &str) {
        self.page = PageId::new(page);
    }

    pub fn viewport(&self) -> &[NodeId] {
        &self.viewport
    }

    /// Number of `style()` lookups served so far.
    pub fn style_lookups(&self) -> usize {
        self.style_lookups.get()
    }

    /// Number of `set_selection` calls made by the engine.
    pub fn selection_writes(&self) -> usize {
        self.selection_writes
    }

    pub fn is_font_loaded(&self, font: &FontName) -> bool {
        self.loaded_fonts.borrow().contains(font)
    }

    fn require_loaded(&self, font: &FontName) -> Result<(), HostError> {
        if self.is_font_loaded(font) {
            Ok(())
        } else {
            Err(HostError::FontNotLoaded {
                family: font.family.clone(),
                style: font.style.clone(),
            })
        }
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut SceneNode, HostError> {
        self.nodes.get_mut(id).ok_or_else(|| not_found(id))
    }

    fn unsupported(id: &NodeId, operation: &str) -> HostError {
        HostError::Unsupported {
            node: id.to_string(),
            operation: operation.to_string(),
        }
    }

    fn local_styles(&self, text: bool) -> Vec<Style> {
        self.style_order
            .iter()
            .filter_map(|id| self.styles.get(id))
            .filter(|s| matches!(s.kind, StyleKind::Text { .. }) == text)
            .cloned()
            .collect()
    }
}

impl HostDocument for MemoryDocument {
    fn current_page(&self) -> PageId {
        self.page.clone()
    }

    fn page_children(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn node(&self, id: &NodeId) -> Option<SceneNode> {
        self.nodes.get(id).cloned()
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, ids: &[NodeId]) {
        self.selection_writes += 1;
        self.selection = ids
            .iter()
            .filter(|id| self.nodes.contains_key(*id))
            .cloned()
            .collect();
    }

    fn scroll_into_view(&mut self, ids: &[NodeId]) {
        self.viewport = ids.to_vec();
    }

    async fn style(&self, id: &StyleId) -> Result<Style, HostError> {
        self.style_lookups.set(self.style_lookups.get() + 1);
        self.styles
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::StyleNotFound(id.to_string()))
    }

    async fn variable(&self, id: &VariableId) -> Result<Variable, HostError> {
        self.variables
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::VariableNotFound(id.to_string()))
    }

    async fn local_paint_styles(&self) -> Result<Vec<Style>, HostError> {
        Ok(self.local_styles(false))
    }

    async fn local_text_styles(&self) -> Result<Vec<Style>, HostError> {
        Ok(self.local_styles(true))
    }

    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        if self.unavailable_fonts.contains(font) {
            return Err(HostError::FontUnavailable {
                family: font.family.clone(),
                style: font.style.clone(),
            });
        }
        self.loaded_fonts.borrow_mut().insert(font.clone());
        Ok(())
    }

    async fn set_style_binding(
        &mut self,
        node: &NodeId,
        slot: StyleSlot,
        style: Option<&StyleId>,
    ) -> Result<(), HostError> {
        let resolved = match style {
            Some(id) => Some(
                self.styles
                    .get(id)
                    .cloned()
                    .ok_or_else(|| HostError::StyleNotFound(id.to_string()))?,
            ),
            None => None,
        };

        match slot {
            StyleSlot::Fill | StyleSlot::Stroke => {
                let paint_slot = if slot == StyleSlot::Fill {
                    PaintSlot::Fill
                } else {
                    PaintSlot::Stroke
                };
                let style_paints = match &resolved {
                    Some(style) => Some(
                        style
                            .paints()
                            .ok_or_else(|| Self::unsupported(node, "text style on paint slot"))?
                            .to_vec(),
                    ),
                    None => None,
                };
                let target = self.node_mut(node)?;
                let paints = target
                    .paints_mut()
                    .ok_or_else(|| Self::unsupported(node, "paint style"))?;
                match (resolved, style_paints) {
                    (Some(style), Some(style_paints)) => {
                        *paints.paints_mut(paint_slot) = style_paints;
                        *paints.binding_mut(paint_slot) = StyleBinding::Style(style.id);
                    }
                    _ => *paints.binding_mut(paint_slot) = StyleBinding::None,
                }
                Ok(())
            }
            StyleSlot::Text => {
                if let Some(style) = &resolved {
                    let props = style
                        .text()
                        .ok_or_else(|| Self::unsupported(node, "paint style on text slot"))?;
                    self.require_loaded(&props.font_name)?;
                }
                let target = self.node_mut(node)?;
                let NodeKind::Text {
                    text, text_style, ..
                } = &mut target.kind
                else {
                    return Err(Self::unsupported(node, "text style"));
                };
                match resolved {
                    Some(style) => {
                        if let Some(props) = style.text() {
                            *text = props.clone();
                        }
                        *text_style = StyleBinding::Style(style.id);
                    }
                    None => *text_style = StyleBinding::None,
                }
                Ok(())
            }
        }
    }

    async fn bind_paint_variable(
        &mut self,
        node: &NodeId,
        slot: PaintSlot,
        variable: &VariableId,
    ) -> Result<(), HostError> {
        let color = self
            .variables
            .get(variable)
            .ok_or_else(|| HostError::VariableNotFound(variable.to_string()))?
            .color()
            .ok_or_else(|| HostError::Rejected(format!("{variable} is not a color variable")))?;
        let target = self.node_mut(node)?;
        let paints = target
            .paints_mut()
            .ok_or_else(|| Self::unsupported(node, "paint variable"))?;
        let bound = Paint::Solid {
            color,
            opacity: match paints.paints(slot).first() {
                Some(Paint::Solid { opacity, .. }) => *opacity,
                _ => 1.0,
            },
            visible: true,
            bound_variable: Some(variable.clone()),
        };
        let list = paints.paints_mut(slot);
        if list.is_empty() {
            list.push(bound);
        } else {
            list[0] = bound;
        }
        *paints.binding_mut(slot) = StyleBinding::None;
        Ok(())
    }

    fn set_paints(
        &mut self,
        node: &NodeId,
        slot: PaintSlot,
        new_paints: Vec<Paint>,
    ) -> Result<(), HostError> {
        let target = self.node_mut(node)?;
        let paints = target
            .paints_mut()
            .ok_or_else(|| Self::unsupported(node, "paints"))?;
        *paints.paints_mut(slot) = new_paints;
        *paints.binding_mut(slot) = StyleBinding::None;
        Ok(())
    }

    fn set_text_props(&mut self, node: &NodeId, props: &TextProps) -> Result<(), HostError> {
        self.require_loaded(&props.font_name)?;
        let target = self.node_mut(node)?;
        let NodeKind::Text {
            text, text_style, ..
        } = &mut target.kind
        else {
            return Err(Self::unsupported(node, "text properties"));
        };
        *text = props.clone();
        *text_style = StyleBinding::None;
        Ok(())
    }
}
