//! The host document seam.
//!
//! Scene-graph reads are synchronous so the inventory collector can walk a
//! whole page without suspending. Style, variable and font operations are
//! asynchronous, like the host's own request/response API.

use crate::errors::HostError;
use crate::types::{
    FontName, NodeId, PageId, Paint, PaintSlot, SceneNode, Style, StyleId, StyleSlot, TextProps,
    Variable, VariableId,
};

#[allow(async_fn_in_trait)]
pub trait HostDocument {
    /// Identifier of the page currently shown.
    fn current_page(&self) -> PageId;

    /// Top-level nodes of the current page.
    fn page_children(&self) -> Vec<NodeId>;

    /// Snapshot of a node, or `None` if it no longer exists.
    fn node(&self, id: &NodeId) -> Option<SceneNode>;

    /// The live selection, in host order.
    fn selection(&self) -> Vec<NodeId>;

    /// Replace the selection. Unknown ids are dropped by the host.
    fn set_selection(&mut self, ids: &[NodeId]);

    /// Move the viewport so the given nodes are framed.
    fn scroll_into_view(&mut self, ids: &[NodeId]);

    async fn style(&self, id: &StyleId) -> Result<Style, HostError>;

    async fn variable(&self, id: &VariableId) -> Result<Variable, HostError>;

    async fn local_paint_styles(&self) -> Result<Vec<Style>, HostError>;

    async fn local_text_styles(&self) -> Result<Vec<Style>, HostError>;

    /// Load a font. Writing text properties with an unloaded font fails.
    async fn load_font(&self, font: &FontName) -> Result<(), HostError>;

    /// Bind (`Some`) or detach (`None`) a style on one of the node's slots.
    async fn set_style_binding(
        &mut self,
        node: &NodeId,
        slot: StyleSlot,
        style: Option<&StyleId>,
    ) -> Result<(), HostError>;

    /// Rewrite the first paint of the slot so its color channel is bound to
    /// `variable`. A node with no paint in the slot gets a new solid paint.
    async fn bind_paint_variable(
        &mut self,
        node: &NodeId,
        slot: PaintSlot,
        variable: &VariableId,
    ) -> Result<(), HostError>;

    /// Replace the raw paint list of a slot. Detaches any style on the slot.
    fn set_paints(&mut self, node: &NodeId, slot: PaintSlot, paints: Vec<Paint>)
        -> Result<(), HostError>;

    /// Replace the typographic properties of a text node. Detaches its text
    /// style. The target font must already be loaded.
    fn set_text_props(&mut self, node: &NodeId, props: &TextProps) -> Result<(), HostError>;
}
