//! Configuration module for rolegrant
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ROLEGRANT_*)
//! 3. Explicit `--config` file, or `./rolegrant.toml`
//! 4. User config (`<config dir>/rolegrant/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, LoaderConfig, OutputConfig};
