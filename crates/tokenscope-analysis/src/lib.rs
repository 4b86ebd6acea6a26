//! Token-compliance analysis engine.
//!
//! Walks a host document's scene graph, classifies every visible paint and
//! every text node as backed by a design token or not, groups the
//! non-compliant occurrences, collects the tokens worth suggesting, and
//! applies or reverts token bindings.

pub mod color;
pub mod compliance;
pub mod inventory;
pub mod mutation;
pub mod types;
pub mod walker;
pub mod weight;

pub use compliance::ComplianceChecker;
pub use inventory::TokenInventory;
pub use mutation::{MutationEngine, SnapshotStore};
pub use types::{
    ColorGroup, ColorToken, PaintKind, PaintOccurrence, TokenSource, TypographyGroup,
    TypographyOccurrence, TypographyToken,
};
pub use walker::{analyze_colors, analyze_typography, AnalysisOptions};
