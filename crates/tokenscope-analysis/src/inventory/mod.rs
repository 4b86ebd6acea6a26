//! Token inventory: the tokens offered when fixing a flagged occurrence.
//!
//! - `collector`: two-phase page scan (sync binding walk, concurrent resolution)
//! - `cache`: page-keyed memo of the collected lists
//! - `ranking`: closest-match-first ordering for typography suggestions

pub mod cache;
pub mod collector;
pub mod ranking;

pub use cache::TokenInventory;
pub use collector::{
    collect_applied_color_tokens, collect_applied_text_tokens, collect_page_bindings,
    PageBindings,
};
pub use ranking::{rank_typography_tokens, typography_distance};
