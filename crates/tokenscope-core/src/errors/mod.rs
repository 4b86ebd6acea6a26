//! Error handling for tokenscope.
//! One error enum per subsystem, `thiserror` only.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod host_error;
pub mod mutation_error;
pub mod protocol_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use host_error::HostError;
pub use mutation_error::MutationError;
pub use protocol_error::ProtocolError;
