//! The UI panel wire protocol: a closed set of JSON messages tagged by
//! `type`, with camelCase fields.

use serde::{Deserialize, Serialize};

use tokenscope_analysis::{ColorGroup, ColorToken, TypographyGroup, TypographyToken};
use tokenscope_core::types::NodeId;
use tokenscope_core::ProtocolError;

use crate::state::Tab;

/// Messages from the UI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum InboundMessage {
    SelectNode {
        node_id: NodeId,
    },
    SelectMultipleNodes {
        node_ids: Vec<NodeId>,
    },
    GetSuggestedTokens {
        #[serde(default)]
        node_id: Option<NodeId>,
    },
    /// Either `nodeIds` or `nodeId` names the targets.
    ApplyToken {
        #[serde(default)]
        node_ids: Option<Vec<NodeId>>,
        #[serde(default)]
        node_id: Option<NodeId>,
        style_id: String,
        #[serde(default)]
        is_stroke: bool,
        #[serde(default)]
        is_text: bool,
    },
    ApplyTokenMultiple {
        node_ids: Vec<NodeId>,
        style_id: String,
        #[serde(default)]
        is_stroke: bool,
    },
    ApplyTypographyTokenMultiple {
        node_ids: Vec<NodeId>,
        style_id: String,
    },
    RemoveColorToken {
        node_ids: Vec<NodeId>,
        #[serde(default)]
        is_stroke: bool,
    },
    RemoveTextToken {
        node_ids: Vec<NodeId>,
    },
    ToggleHidden {
        value: bool,
    },
    SwitchTab {
        tab: Tab,
    },
    EnterListView,
    SaveInitialSelection,
    SaveOriginalState {
        node_ids: Vec<NodeId>,
    },
    BackToList,
    Reanalyze,
}

impl InboundMessage {
    /// Whether handling this message starts a new analysis pass, making any
    /// walk still in flight stale.
    pub fn triggers_analysis(&self) -> bool {
        matches!(
            self,
            Self::ApplyToken { .. }
                | Self::ApplyTokenMultiple { .. }
                | Self::ApplyTypographyTokenMultiple { .. }
                | Self::RemoveColorToken { .. }
                | Self::RemoveTextToken { .. }
                | Self::ToggleHidden { .. }
                | Self::SwitchTab { .. }
                | Self::BackToList
                | Self::Reanalyze
        )
    }

    /// Target nodes of an `apply-token`, `nodeIds` winning over `nodeId`.
    pub fn apply_targets(&self) -> Option<Vec<NodeId>> {
        match self {
            Self::ApplyToken {
                node_ids, node_id, ..
            } => match (node_ids, node_id) {
                (Some(ids), _) if !ids.is_empty() => Some(ids.clone()),
                (_, Some(id)) => Some(vec![id.clone()]),
                (Some(ids), None) => Some(ids.clone()),
                (None, None) => None,
            },
            _ => None,
        }
    }
}

/// Messages to the UI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum OutboundMessage {
    ResultColors {
        groups: Vec<ColorGroup>,
    },
    ResultTypography {
        groups: Vec<TypographyGroup>,
    },
    /// `clear_all` empties every tab, not just the active one.
    Empty {
        clear_all: bool,
    },
    InitTab {
        tab: Tab,
    },
    ResultSuggestedTokens {
        tokens: Vec<ColorToken>,
    },
    ResultSuggestedTextTokens {
        tokens: Vec<TypographyToken>,
    },
    TokenAppliedSuccess {
        style_name: String,
        style_id: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fallback_nodes: Vec<NodeId>,
    },
    TokenAppliedError {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    TokenRemovedSuccess,
    UpdateDetail {
        node_id: NodeId,
        style_name: String,
        style_id: String,
    },
    SelectionChanged,
    FrameChanged,
    AnalyzingStart,
}

/// Decode and validate one inbound message.
pub fn decode_inbound(raw: &str) -> Result<InboundMessage, ProtocolError> {
    let message: InboundMessage =
        serde_json::from_str(raw).map_err(|e| ProtocolError::Decode(e.to_string()))?;
    if matches!(message, InboundMessage::ApplyToken { .. }) && message.apply_targets().is_none() {
        return Err(ProtocolError::MissingField {
            message: "apply-token",
            field: "nodeIds",
        });
    }
    Ok(message)
}

pub fn encode_outbound(message: &OutboundMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(|e| ProtocolError::Encode(e.to_string()))
}
