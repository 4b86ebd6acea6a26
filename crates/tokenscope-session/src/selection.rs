//! Container resolution from a raw selection.

use tokenscope_core::types::collections::{FxHashSet, SmallVec4};
use tokenscope_core::types::NodeId;
use tokenscope_core::HostDocument;

/// Nearest container at or above `id`, if any.
pub fn owning_container<H: HostDocument>(host: &H, id: &NodeId) -> Option<NodeId> {
    let mut current = host.node(id)?;
    loop {
        if current.is_container() {
            return Some(current.id);
        }
        current = host.node(current.parent.as_ref()?)?;
    }
}

/// Owning containers of every selected node, deduplicated, in selection order.
pub fn resolve_containers<H: HostDocument>(host: &H, selection: &[NodeId]) -> SmallVec4<NodeId> {
    let mut seen = FxHashSet::default();
    selection
        .iter()
        .filter_map(|id| owning_container(host, id))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
