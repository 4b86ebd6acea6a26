//! Apply/remove errors.

use super::error_code::{self, ErrorCode};
use super::HostError;

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Token {token} cannot be applied as {target}")]
    IncompatibleToken { token: String, target: String },

    #[error("No target nodes")]
    NoTargets,

    #[error("Token applied to {applied} of {total} nodes")]
    Partial { applied: usize, total: usize },
}

impl ErrorCode for MutationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Host(e) => e.error_code(),
            Self::TokenNotFound(_) => error_code::TOKEN_NOT_FOUND,
            Self::IncompatibleToken { .. } => error_code::INCOMPATIBLE_TOKEN,
            Self::NoTargets => error_code::NO_TARGETS,
            Self::Partial { .. } => error_code::PARTIAL_FAILURE,
        }
    }
}
