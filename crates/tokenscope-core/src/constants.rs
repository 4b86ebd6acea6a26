//! Shared constants for the tokenscope engine.

/// tokenscope version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Category prefixes a paint style name must start with to count as a token.
pub const DEFAULT_TOKEN_PREFIXES: [&str; 6] = [
    "Base Color/",
    "Contextual Color/",
    "Base/",
    "Surface Colors/",
    "Content Colors/",
    "Brand Colors/",
];

/// Label used for gradient groups.
pub const DEFAULT_GRADIENT_LABEL: &str = "Gradiente";

/// Visited nodes between cooperative yields.
pub const DEFAULT_YIELD_INTERVAL: u32 = 250;

/// Decorative markers stripped from token display names.
pub const DEFAULT_DECORATIVE_MARKERS: [&str; 1] = ["✅"];

/// A cleaned token name starting with one of these is private.
pub const DEFAULT_PRIVATE_MARKERS: [&str; 2] = ["_", "/"];

/// Seconds a page's token inventory may be reused before it is rebuilt.
pub const DEFAULT_INVENTORY_CACHE_TTL_SECONDS: u64 = 300;

/// Font used when neither a token's font nor the node's font can be loaded.
pub const DEFAULT_FALLBACK_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_FALLBACK_FONT_STYLE: &str = "Regular";

/// Weight assumed when a font style carries no recognizable weight.
pub const DEFAULT_FONT_WEIGHT: u16 = 400;
