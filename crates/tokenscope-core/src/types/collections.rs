//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for per-node id lists (selections are usually tiny).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
