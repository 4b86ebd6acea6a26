//! Structured span field names.
//!
//! Used consistently across crates so log queries can filter on them.

/// Walker: nodes visited in one analysis pass.
pub const VISITED_NODES: &str = "visited_nodes";

/// Walker: groups produced by one analysis pass.
pub const GROUP_COUNT: &str = "group_count";

/// Walker: non-compliant occurrences found by one analysis pass.
pub const OCCURRENCE_COUNT: &str = "occurrence_count";
