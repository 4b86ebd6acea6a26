//! Shared foundation for tokenscope: the scene model the host exposes, the
//! `HostDocument` seam, identifiers, errors, configuration and tracing.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;

pub use config::TokenscopeConfig;
pub use errors::{AnalysisError, ConfigError, ErrorCode, HostError, MutationError, ProtocolError};
pub use traits::{Cancellable, CancellationToken, HostDocument};
