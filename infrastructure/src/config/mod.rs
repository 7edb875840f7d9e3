//! Configuration file loading for ollama-court
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COURT_*` environment variables
//! 2. `--config <path>` specified file (TOML, or YAML by extension)
//! 3. Project root: `./court.toml`, `./.court.toml` or `./config.yaml`
//! 4. XDG config: `$XDG_CONFIG_HOME/ollama-court/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileModelsConfig, FileOllamaConfig, FileOutputConfig,
    FilePromptsConfig, FileSettingsConfig,
};
pub use loader::ConfigLoader;
