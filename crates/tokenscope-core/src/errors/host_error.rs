//! Errors reported by the host document.

use super::error_code::{self, ErrorCode};

/// Failures of a host read or write. Lookups that fail with one of the
/// `*NotFound` variants are treated as "absent" by the engine, never fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Style not found: {0}")]
    StyleNotFound(String),

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    #[error("Font unavailable: {family} {style}")]
    FontUnavailable { family: String, style: String },

    #[error("Font not loaded: {family} {style}")]
    FontNotLoaded { family: String, style: String },

    #[error("Node {node} does not support {operation}")]
    Unsupported { node: String, operation: String },

    #[error("Host rejected the request: {0}")]
    Rejected(String),
}

impl HostError {
    /// True for stale or deleted references.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound(_) | Self::StyleNotFound(_) | Self::VariableNotFound(_)
        )
    }
}

impl ErrorCode for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) | Self::StyleNotFound(_) | Self::VariableNotFound(_) => {
                error_code::NOT_FOUND
            }
            Self::FontUnavailable { .. } | Self::FontNotLoaded { .. } => {
                error_code::FONT_UNAVAILABLE
            }
            Self::Unsupported { .. } | Self::Rejected(_) => error_code::HOST_ERROR,
        }
    }
}
