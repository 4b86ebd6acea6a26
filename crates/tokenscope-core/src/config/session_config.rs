//! Session configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Tab shown when the session starts: "colors" or "typography".
    pub initial_tab: Option<String>,
}

impl SessionConfig {
    pub fn effective_initial_tab(&self) -> &str {
        self.initial_tab.as_deref().unwrap_or("colors")
    }
}
