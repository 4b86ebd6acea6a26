//! Seams between the engine and the outside world.

pub mod cancellation;
pub mod host;

pub use cancellation::{Cancellable, CancellationToken};
pub use host::HostDocument;
