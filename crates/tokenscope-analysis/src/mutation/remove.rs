//! Token removal: restore from snapshot, or detach.

use tracing::{debug, info, warn};

use tokenscope_core::types::{NodeId, Paint, PaintSlot, StyleSlot};
use tokenscope_core::{HostDocument, HostError, MutationError};

use crate::mutation::apply::{ApplyTarget, MutationEngine};
use crate::mutation::snapshot::{OriginalNodeState, SnapshotStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveOutcome {
    /// Nodes put back to their snapshotted state.
    pub restored: Vec<NodeId>,
    /// Nodes without a snapshot whose binding was cleared.
    pub detached: Vec<NodeId>,
    /// Nodes that no longer resolve or that the host refused to edit.
    pub skipped: Vec<NodeId>,
}

async fn restore_paints<H: HostDocument>(
    host: &mut H,
    id: &NodeId,
    original: &OriginalNodeState,
    slot: PaintSlot,
) -> Result<(), HostError> {
    if let Some(style) = original.binding(slot).style_id() {
        match host.set_style_binding(id, StyleSlot::from(slot), Some(style)).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_not_found() => {
                debug!(
                    node_id = %id,
                    style_id = %style,
                    "original style gone, restoring raw paints"
                );
            }
            Err(e) => return Err(e),
        }
    }
    host.set_paints(id, slot, original.paints(slot).to_vec())
}

async fn restore_text<H: HostDocument>(
    host: &mut H,
    id: &NodeId,
    original: &OriginalNodeState,
) -> Result<(), HostError> {
    let Some(text) = &original.text else {
        return Err(HostError::Unsupported {
            node: id.to_string(),
            operation: "text restore".to_string(),
        });
    };
    host.load_font(&text.props.font_name).await?;
    if let Some(style) = text.text_style.style_id() {
        match host.set_style_binding(id, StyleSlot::Text, Some(style)).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!(
                    node_id = %id,
                    style_id = %style,
                    error = %e,
                    "original text style unusable, restoring raw properties"
                );
            }
        }
    }
    host.set_text_props(id, &text.props)
}

/// Clear the slot's binding and strip bound variables off its paints,
/// keeping the rendered values.
async fn detach<H: HostDocument>(
    host: &mut H,
    id: &NodeId,
    target: ApplyTarget,
) -> Result<(), HostError> {
    let node = host
        .node(id)
        .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
    match target {
        ApplyTarget::Text => host.set_style_binding(id, StyleSlot::Text, None).await,
        ApplyTarget::Paint(slot) => {
            let Some(paints) = node.paints() else {
                return Ok(());
            };
            let current = paints.paints(slot);
            if current.iter().any(|p| p.bound_variable().is_some()) {
                let raw: Vec<Paint> = current.iter().map(Paint::detached).collect();
                host.set_paints(id, slot, raw)
            } else {
                host.set_style_binding(id, StyleSlot::from(slot), None).await
            }
        }
    }
}

impl MutationEngine {
    /// Revert `target` on every node. Never fails once the target list is
    /// non-empty: per-node problems are logged and listed in `skipped`.
    #[tracing::instrument(skip_all, fields(target_count = node_ids.len()))]
    pub async fn remove_token<H: HostDocument>(
        &self,
        host: &mut H,
        snapshots: &SnapshotStore,
        node_ids: &[NodeId],
        target: ApplyTarget,
    ) -> Result<RemoveOutcome, MutationError> {
        if node_ids.is_empty() {
            return Err(MutationError::NoTargets);
        }
        let mut outcome = RemoveOutcome::default();
        for id in node_ids {
            let result = match (snapshots.get(id), target) {
                (Some(original), ApplyTarget::Paint(slot)) => {
                    restore_paints(host, id, original, slot).await.map(|_| true)
                }
                (Some(original), ApplyTarget::Text) => {
                    restore_text(host, id, original).await.map(|_| true)
                }
                (None, target) => detach(host, id, target).await.map(|_| false),
            };
            match result {
                Ok(true) => outcome.restored.push(id.clone()),
                Ok(false) => outcome.detached.push(id.clone()),
                Err(e) => {
                    warn!(node_id = %id, error = %e, "token removal skipped node");
                    outcome.skipped.push(id.clone());
                }
            }
        }
        info!(
            restored = outcome.restored.len(),
            detached = outcome.detached.len(),
            skipped = outcome.skipped.len(),
            "token removed"
        );
        Ok(outcome)
    }
}
