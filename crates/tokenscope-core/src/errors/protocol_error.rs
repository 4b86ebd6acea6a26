//! UI message boundary errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Cannot decode message: {0}")]
    Decode(String),

    #[error("Cannot encode message: {0}")]
    Encode(String),

    #[error("Message {message} is missing {field}")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },
}

impl ErrorCode for ProtocolError {
    fn error_code(&self) -> &'static str {
        error_code::PROTOCOL_ERROR
    }
}
