//! Configuration module for apksign
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (APKSIGN_*)
//! 3. `--config <file>` or user config (~/.config/apksign/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_env, default_config_path};
pub use types::{Config, RegistryConfig, SignConfig, ToolsConfig};
