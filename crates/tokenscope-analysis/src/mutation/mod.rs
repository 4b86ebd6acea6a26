//! Reversible token application.
//!
//! Nodes are snapshotted before their first mutation; removal restores the
//! snapshot when one exists and otherwise detaches whatever is bound.

pub mod apply;
pub mod remove;
pub mod snapshot;

pub use apply::{AppliedNode, ApplyOutcome, ApplyTarget, MutationEngine};
pub use remove::RemoveOutcome;
pub use snapshot::{OriginalNodeState, SnapshotStore, TextSnapshot};
