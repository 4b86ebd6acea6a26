//! Configuration system for tokenscope.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod analysis_config;
pub mod inventory_config;
pub mod session_config;
pub mod tokenscope_config;

pub use analysis_config::AnalysisConfig;
pub use inventory_config::InventoryConfig;
pub use session_config::SessionConfig;
pub use tokenscope_config::TokenscopeConfig;
