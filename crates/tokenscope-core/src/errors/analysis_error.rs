//! Analysis errors.

use super::error_code::{self, ErrorCode};
use super::HostError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// A newer analysis request superseded this walk.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Host(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
