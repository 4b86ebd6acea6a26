//! Session view state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tokenscope_core::types::collections::SmallVec4;
use tokenscope_core::types::NodeId;
use tokenscope_core::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Colors,
    Typography,
}

impl Tab {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Typography => "typography",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colors" => Ok(Self::Colors),
            "typography" => Ok(Self::Typography),
            other => Err(ConfigError::ValidationFailed {
                field: "session.initial_tab".to_string(),
                message: format!("unknown tab '{other}'"),
            }),
        }
    }
}

/// Where the user is in the panel.
///
/// `Idle` has no container; `Analyzing` has a walk in flight; `ListView`
/// shows grouped findings; `DetailView` is focused on selected occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    ListView,
    DetailView,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub include_hidden: bool,
    pub phase: Phase,
    /// Containers resolved from the most recent non-empty selection.
    pub root_containers: SmallVec4<NodeId>,
    /// Selection to restore when leaving a detail view.
    pub initial_selection: Option<Vec<NodeId>>,
    /// Exact selection the session itself last wrote to the host.
    pub suppressed_selection: Option<Vec<NodeId>>,
    /// The last walk was cancelled and nothing has replaced its result.
    pub superseded: bool,
}

impl ViewState {
    pub fn new(tab: Tab, include_hidden: bool) -> Self {
        Self {
            tab,
            include_hidden,
            ..Self::default()
        }
    }

    /// Consume the suppression record. True if `live` is the selection the
    /// session wrote, meaning the host event is our own echo.
    pub fn take_self_triggered(&mut self, live: &[NodeId]) -> bool {
        self.suppressed_selection
            .take()
            .is_some_and(|expected| expected == live)
    }
}
