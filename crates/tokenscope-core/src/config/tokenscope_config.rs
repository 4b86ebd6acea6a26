//! Top-level tokenscope configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, InventoryConfig, SessionConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "tokenscope.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TOKENSCOPE_*`)
/// 2. Project config (`tokenscope.toml` in the plugin root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TokenscopeConfig {
    pub analysis: AnalysisConfig,
    pub inventory: InventoryConfig,
    pub session: SessionConfig,
}

impl TokenscopeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TokenscopeConfig) -> Result<(), ConfigError> {
        if config.analysis.yield_interval == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.yield_interval".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.analysis.token_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.token_prefixes".to_string(),
                message: "prefixes must be non-empty".to_string(),
            });
        }
        if config.inventory.cache_ttl_seconds == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inventory.cache_ttl_seconds".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref tab) = config.session.initial_tab {
            if tab != "colors" && tab != "typography" {
                return Err(ConfigError::ValidationFailed {
                    field: "session.initial_tab".to_string(),
                    message: format!("unknown tab '{tab}', expected colors or typography"),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TokenscopeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TokenscopeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it is set.
    fn merge(base: &mut TokenscopeConfig, other: &TokenscopeConfig) {
        // Analysis
        if other.analysis.yield_interval.is_some() {
            base.analysis.yield_interval = other.analysis.yield_interval;
        }
        if other.analysis.include_hidden.is_some() {
            base.analysis.include_hidden = other.analysis.include_hidden;
        }
        if !other.analysis.token_prefixes.is_empty() {
            base.analysis.token_prefixes = other.analysis.token_prefixes.clone();
        }
        if other.analysis.gradient_label.is_some() {
            base.analysis.gradient_label = other.analysis.gradient_label.clone();
        }

        // Inventory
        if !other.inventory.decorative_markers.is_empty() {
            base.inventory.decorative_markers = other.inventory.decorative_markers.clone();
        }
        if !other.inventory.private_markers.is_empty() {
            base.inventory.private_markers = other.inventory.private_markers.clone();
        }
        if other.inventory.cache_ttl_seconds.is_some() {
            base.inventory.cache_ttl_seconds = other.inventory.cache_ttl_seconds;
        }
        if other.inventory.fallback_font_family.is_some() {
            base.inventory.fallback_font_family = other.inventory.fallback_font_family.clone();
        }
        if other.inventory.fallback_font_style.is_some() {
            base.inventory.fallback_font_style = other.inventory.fallback_font_style.clone();
        }

        // Session
        if other.session.initial_tab.is_some() {
            base.session.initial_tab = other.session.initial_tab.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TOKENSCOPE_ANALYSIS_YIELD_INTERVAL`, `TOKENSCOPE_SESSION_INITIAL_TAB`, etc.
    fn apply_env_overrides(config: &mut TokenscopeConfig) {
        if let Ok(val) = std::env::var("TOKENSCOPE_ANALYSIS_YIELD_INTERVAL") {
            if let Ok(v) = val.parse::<u32>() {
                config.analysis.yield_interval = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENSCOPE_ANALYSIS_INCLUDE_HIDDEN") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.include_hidden = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENSCOPE_INVENTORY_CACHE_TTL_SECONDS") {
            if let Ok(v) = val.parse::<u64>() {
                config.inventory.cache_ttl_seconds = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENSCOPE_SESSION_INITIAL_TAB") {
            config.session.initial_tab = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
