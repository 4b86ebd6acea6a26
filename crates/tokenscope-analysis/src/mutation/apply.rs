//! Token application, best effort per node.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tokenscope_core::types::collections::FxHashSet;
use tokenscope_core::types::{
    FontName, NodeId, PaintSlot, Style, StyleId, StyleKind, StyleSlot, Variable, VariableId,
};
use tokenscope_core::{HostDocument, HostError, MutationError, TokenscopeConfig};

use crate::color::NameHygiene;
use crate::mutation::snapshot::SnapshotStore;

/// Which binding slot a token is applied to (or removed from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyTarget {
    Paint(PaintSlot),
    Text,
}

impl ApplyTarget {
    pub fn from_flags(is_stroke: bool, is_text: bool) -> Self {
        if is_text {
            Self::Text
        } else {
            Self::Paint(PaintSlot::from_is_stroke(is_stroke))
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Paint(slot) => slot.name(),
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedNode {
    pub node_id: NodeId,
    pub style_name: String,
    pub style_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyOutcome {
    pub applied: Vec<AppliedNode>,
    /// Text nodes that got the token's metrics in a substitute font.
    pub fallback_nodes: Vec<NodeId>,
    pub failures: Vec<(NodeId, HostError)>,
}

impl ApplyOutcome {
    pub fn total(&self) -> usize {
        self.applied.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Partial` when any node failed.
    pub fn into_result(self) -> Result<Self, MutationError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(MutationError::Partial {
                applied: self.applied.len(),
                total: self.total(),
            })
        }
    }
}

/// A token id resolved once for the whole batch.
#[derive(Debug, Clone)]
enum ResolvedToken {
    Variable(Variable),
    PaintStyle(Style),
    TextStyle(Style),
}

impl ResolvedToken {
    fn raw_name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::PaintStyle(s) | Self::TextStyle(s) => &s.name,
        }
    }

    fn id(&self) -> String {
        match self {
            Self::Variable(v) => v.id.to_string(),
            Self::PaintStyle(s) | Self::TextStyle(s) => s.id.to_string(),
        }
    }
}

/// How a text node ended up after an apply.
enum TextApplied {
    Bound,
    Fallback,
}

pub struct MutationEngine {
    hygiene: NameHygiene,
    fallback_font: FontName,
}

impl MutationEngine {
    pub fn new(hygiene: NameHygiene, fallback_font: FontName) -> Self {
        Self {
            hygiene,
            fallback_font,
        }
    }

    pub fn from_config(config: &TokenscopeConfig) -> Self {
        Self::new(
            NameHygiene::from_config(config.analysis.effective_token_prefixes(), &config.inventory),
            config.inventory.effective_fallback_font(),
        )
    }

    /// Variables are tried first for paint targets; text targets only take
    /// text styles.
    async fn resolve<H: HostDocument>(
        &self,
        host: &H,
        token_id: &str,
        target: ApplyTarget,
    ) -> Result<ResolvedToken, MutationError> {
        let incompatible = || MutationError::IncompatibleToken {
            token: token_id.to_string(),
            target: target.name().to_string(),
        };

        if let ApplyTarget::Paint(_) = target {
            match host.variable(&VariableId::new(token_id)).await {
                Ok(variable) if variable.color().is_some() => {
                    return Ok(ResolvedToken::Variable(variable));
                }
                Ok(_) => return Err(incompatible()),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        let style = match host.style(&StyleId::new(token_id)).await {
            Ok(style) => style,
            Err(e) if e.is_not_found() => {
                return Err(MutationError::TokenNotFound(token_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        match (&style.kind, target) {
            (StyleKind::Paint { .. }, ApplyTarget::Paint(_)) => {
                Ok(ResolvedToken::PaintStyle(style))
            }
            (StyleKind::Text { .. }, ApplyTarget::Text) => Ok(ResolvedToken::TextStyle(style)),
            _ => Err(incompatible()),
        }
    }

    /// Apply `token_id` to every node. Each node is snapshotted before its
    /// first edit. A node that fails is reported and the batch moves on;
    /// nodes already applied are not rolled back.
    #[tracing::instrument(
        skip_all,
        fields(token = token_id, target = target.name(), target_count = node_ids.len())
    )]
    pub async fn apply_token<H: HostDocument>(
        &self,
        host: &mut H,
        snapshots: &mut SnapshotStore,
        node_ids: &[NodeId],
        token_id: &str,
        target: ApplyTarget,
    ) -> Result<ApplyOutcome, MutationError> {
        if node_ids.is_empty() {
            return Err(MutationError::NoTargets);
        }
        let token = self.resolve(host, token_id, target).await?;
        let style_name = self.hygiene.display_name(token.raw_name());
        let style_id = token.id();

        let mut outcome = ApplyOutcome::default();
        let mut seen = FxHashSet::default();
        for id in node_ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Err(e) = snapshots.capture(host, id).await {
                warn!(node_id = %id, error = %e, "cannot apply token");
                outcome.failures.push((id.clone(), e));
                continue;
            }

            let result = match (&token, target) {
                (ResolvedToken::Variable(variable), ApplyTarget::Paint(slot)) => host
                    .bind_paint_variable(id, slot, &variable.id)
                    .await
                    .map(|_| TextApplied::Bound),
                (ResolvedToken::PaintStyle(style), ApplyTarget::Paint(slot)) => host
                    .set_style_binding(id, StyleSlot::from(slot), Some(&style.id))
                    .await
                    .map(|_| TextApplied::Bound),
                (ResolvedToken::TextStyle(style), ApplyTarget::Text) => {
                    self.apply_text_style(host, id, style).await
                }
                // resolve() never pairs a token with the other target kind
                _ => Err(HostError::Unsupported {
                    node: id.to_string(),
                    operation: format!("{} token", target.name()),
                }),
            };

            match result {
                Ok(applied) => {
                    if let TextApplied::Fallback = applied {
                        outcome.fallback_nodes.push(id.clone());
                    }
                    outcome.applied.push(AppliedNode {
                        node_id: id.clone(),
                        style_name: style_name.clone(),
                        style_id: style_id.clone(),
                    });
                }
                Err(e) => {
                    warn!(node_id = %id, error = %e, "token apply failed");
                    outcome.failures.push((id.clone(), e));
                }
            }
        }

        info!(
            applied = outcome.applied.len(),
            fallback = outcome.fallback_nodes.len(),
            failed = outcome.failures.len(),
            "token applied"
        );
        Ok(outcome)
    }

    /// Bind a text style, or, when its font cannot be loaded, write its
    /// metrics in the first substitute font that loads: the node's current
    /// font, then the configured fallback.
    async fn apply_text_style<H: HostDocument>(
        &self,
        host: &mut H,
        id: &NodeId,
        style: &Style,
    ) -> Result<TextApplied, HostError> {
        let Some(props) = style.text() else {
            return Err(HostError::Unsupported {
                node: id.to_string(),
                operation: "paint style as text".to_string(),
            });
        };
        let node = host
            .node(id)
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
        let Some((current, _)) = node.text() else {
            return Err(HostError::Unsupported {
                node: id.to_string(),
                operation: "text style".to_string(),
            });
        };

        let missing = match host.load_font(&props.font_name).await {
            Ok(()) => {
                host.set_style_binding(id, StyleSlot::Text, Some(&style.id))
                    .await?;
                return Ok(TextApplied::Bound);
            }
            Err(e) => e,
        };
        debug!(node_id = %id, error = %missing, "token font unavailable, trying fallbacks");

        for font in [&current.font_name, &self.fallback_font] {
            if *font == props.font_name {
                continue;
            }
            if host.load_font(font).await.is_ok() {
                let mut substitute = props.clone();
                substitute.font_name = font.clone();
                host.set_text_props(id, &substitute)?;
                info!(
                    node_id = %id,
                    family = %font.family,
                    style = %font.style,
                    "applied with fallback font"
                );
                return Ok(TextApplied::Fallback);
            }
        }
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{
        color_variable, frame, paint_style, rect, solid, text, text_style, MemoryDocument,
    };
    use tokenscope_core::types::{Paint, StyleBinding};

    fn engine() -> MutationEngine {
        MutationEngine::from_config(&TokenscopeConfig::default())
    }

    fn doc() -> MemoryDocument {
        MemoryDocument::new("page")
            .with_style(paint_style("s-gray", "Base/Gray-500", "#808080"))
            .with_style(text_style("t-body", "Body", "Inter", "Regular", 16.0))
            .with_variable(color_variable("v-accent", "Brand Colors/Accent", "#0055FF"))
            .with_node(None, frame("root"))
            .with_node(Some("root"), rect("a", vec![solid("#FF0000")]))
            .with_node(Some("root"), rect("b", vec![solid("#FF0000")]))
            .with_node(Some("root"), text("t", "Roboto", "Bold", 12.0))
    }

    fn ids(values: &[&str]) -> Vec<NodeId> {
        values.iter().map(|v| NodeId::new(*v)).collect()
    }

    #[tokio::test]
    async fn style_token_binds_every_node() {
        let mut doc = doc();
        let mut snapshots = SnapshotStore::new();
        let outcome = engine()
            .apply_token(
                &mut doc,
                &mut snapshots,
                &ids(&["a", "b"]),
                "s-gray",
                ApplyTarget::Paint(PaintSlot::Fill),
            )
            .await
            .unwrap();
        assert_eq!(outcome.applied.len(), 2);
        assert_eq!(outcome.applied[0].style_name, "Gray-500");
        assert_eq!(snapshots.len(), 2);
        let node = doc.node(&NodeId::new("a")).unwrap();
        assert_eq!(node.paints().unwrap().fill_style, StyleBinding::Style(StyleId::new("s-gray")));
    }

    #[tokio::test]
    async fn variable_is_tried_first() {
        let mut doc = doc();
        let mut snapshots = SnapshotStore::new();
        engine()
            .apply_token(
                &mut doc,
                &mut snapshots,
                &ids(&["a"]),
                "v-accent",
                ApplyTarget::Paint(PaintSlot::Stroke),
            )
            .await
            .unwrap();
        let node = doc.node(&NodeId::new("a")).unwrap();
        let stroke = &node.paints().unwrap().strokes[0];
        assert!(matches!(
            stroke,
            Paint::Solid { bound_variable: Some(v), .. } if v.as_str() == "v-accent"
        ));
    }

    #[tokio::test]
    async fn unknown_token_is_reported() {
        let mut doc = doc();
        let err = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["a"]),
                "nope",
                ApplyTarget::Paint(PaintSlot::Fill),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::TokenNotFound(_)));
    }

    #[tokio::test]
    async fn text_style_on_paint_slot_is_incompatible() {
        let mut doc = doc();
        let err = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["a"]),
                "t-body",
                ApplyTarget::Paint(PaintSlot::Fill),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::IncompatibleToken { .. }));
    }

    #[tokio::test]
    async fn empty_target_list_is_rejected() {
        let mut doc = doc();
        let err = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &[],
                "s-gray",
                ApplyTarget::Paint(PaintSlot::Fill),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::NoTargets));
    }

    #[tokio::test]
    async fn missing_node_does_not_abort_the_batch() {
        let mut doc = doc();
        let outcome = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["gone", "a"]),
                "s-gray",
                ApplyTarget::Paint(PaintSlot::Fill),
            )
            .await
            .unwrap();
        assert_eq!(outcome.applied.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(
            outcome.into_result(),
            Err(MutationError::Partial { applied: 1, total: 2 })
        ));
    }

    #[tokio::test]
    async fn text_style_binds_when_font_loads() {
        let mut doc = doc();
        let outcome = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["t"]),
                "t-body",
                ApplyTarget::Text,
            )
            .await
            .unwrap();
        assert!(outcome.fallback_nodes.is_empty());
        let node = doc.node(&NodeId::new("t")).unwrap();
        let (props, binding) = node.text().unwrap();
        assert_eq!(binding, &StyleBinding::Style(StyleId::new("t-body")));
        assert_eq!(props.font_name, FontName::new("Inter", "Regular"));
    }

    #[tokio::test]
    async fn unavailable_font_falls_back_to_current_font() {
        let mut doc = doc().with_unavailable_font(FontName::new("Inter", "Regular"));
        let outcome = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["t"]),
                "t-body",
                ApplyTarget::Text,
            )
            .await
            .unwrap();
        assert_eq!(outcome.fallback_nodes, ids(&["t"]));
        let node = doc.node(&NodeId::new("t")).unwrap();
        let (props, binding) = node.text().unwrap();
        assert_eq!(binding, &StyleBinding::None);
        assert_eq!(props.font_name, FontName::new("Roboto", "Bold"));
        assert_eq!(props.font_size, 16.0);
    }

    #[tokio::test]
    async fn no_loadable_font_fails_the_node() {
        let mut doc = doc()
            .with_unavailable_font(FontName::new("Inter", "Regular"))
            .with_unavailable_font(FontName::new("Roboto", "Bold"));
        let outcome = engine()
            .apply_token(
                &mut doc,
                &mut SnapshotStore::new(),
                &ids(&["t"]),
                "t-body",
                ApplyTarget::Text,
            )
            .await
            .unwrap();
        assert!(outcome.applied.is_empty());
        assert_eq!(outcome.failures.len(), 1);
    }
}
