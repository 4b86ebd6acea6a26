//! Token inventory configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DECORATIVE_MARKERS, DEFAULT_FALLBACK_FONT_FAMILY, DEFAULT_FALLBACK_FONT_STYLE,
    DEFAULT_INVENTORY_CACHE_TTL_SECONDS, DEFAULT_PRIVATE_MARKERS,
};
use crate::types::FontName;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InventoryConfig {
    /// Markers stripped from token display names.
    #[serde(default)]
    pub decorative_markers: Vec<String>,
    /// Cleaned names starting with one of these are hidden.
    #[serde(default)]
    pub private_markers: Vec<String>,
    /// Upper bound on how long a page's inventory is reused. Default: 300.
    pub cache_ttl_seconds: Option<u64>,
    /// Last-resort font for typography apply. Default: Inter.
    pub fallback_font_family: Option<String>,
    /// Default: Regular.
    pub fallback_font_style: Option<String>,
}

impl InventoryConfig {
    pub fn effective_decorative_markers(&self) -> Vec<String> {
        if self.decorative_markers.is_empty() {
            DEFAULT_DECORATIVE_MARKERS.iter().map(|m| m.to_string()).collect()
        } else {
            self.decorative_markers.clone()
        }
    }

    pub fn effective_private_markers(&self) -> Vec<String> {
        if self.private_markers.is_empty() {
            DEFAULT_PRIVATE_MARKERS.iter().map(|m| m.to_string()).collect()
        } else {
            self.private_markers.clone()
        }
    }

    pub fn effective_cache_ttl_seconds(&self) -> u64 {
        self.cache_ttl_seconds
            .unwrap_or(DEFAULT_INVENTORY_CACHE_TTL_SECONDS)
    }

    pub fn effective_fallback_font(&self) -> FontName {
        FontName::new(
            self.fallback_font_family
                .as_deref()
                .unwrap_or(DEFAULT_FALLBACK_FONT_FAMILY),
            self.fallback_font_style
                .as_deref()
                .unwrap_or(DEFAULT_FALLBACK_FONT_STYLE),
        )
    }
}
