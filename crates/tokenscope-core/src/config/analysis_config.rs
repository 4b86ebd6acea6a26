//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRADIENT_LABEL, DEFAULT_TOKEN_PREFIXES, DEFAULT_YIELD_INTERVAL};

/// Configuration for the tree walker and the compliance predicates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Visited nodes between cooperative yields. Default: 250.
    pub yield_interval: Option<u32>,
    /// Analyze hidden nodes and their subtrees. Default: false.
    pub include_hidden: Option<bool>,
    /// Style-name prefixes that mark a paint style as a token.
    #[serde(default)]
    pub token_prefixes: Vec<String>,
    /// Display label for gradient groups. Default: "Gradiente".
    pub gradient_label: Option<String>,
}

impl AnalysisConfig {
    pub fn effective_yield_interval(&self) -> u32 {
        self.yield_interval.unwrap_or(DEFAULT_YIELD_INTERVAL)
    }

    pub fn effective_include_hidden(&self) -> bool {
        self.include_hidden.unwrap_or(false)
    }

    /// Returns the configured prefixes, or the built-in allow-list.
    pub fn effective_token_prefixes(&self) -> Vec<String> {
        if self.token_prefixes.is_empty() {
            DEFAULT_TOKEN_PREFIXES.iter().map(|p| p.to_string()).collect()
        } else {
            self.token_prefixes.clone()
        }
    }

    pub fn effective_gradient_label(&self) -> String {
        self.gradient_label
            .clone()
            .unwrap_or_else(|| DEFAULT_GRADIENT_LABEL.to_string())
    }
}
