//! Raw configuration data types
//!
//! These structs represent the exact structure of the config file.
//! They are deserialized directly and use domain types where appropriate.

mod models;
mod ollama;
mod output;
mod prompts;
mod settings;

pub use models::FileModelsConfig;
pub use ollama::FileOllamaConfig;
pub use output::FileOutputConfig;
pub use prompts::FilePromptsConfig;
pub use settings::FileSettingsConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found in a loaded configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("ollama.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("ollama.host cannot be empty")]
    EmptyHost,

    #[error("models.{0}: model name cannot be empty")]
    EmptyModelName(&'static str),

    #[error("settings.debates_dir cannot be empty")]
    EmptyDebatesDir,
}

/// Complete file configuration (raw structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model per seat
    pub models: FileModelsConfig,
    /// System prompt overrides per seat
    pub prompts: FilePromptsConfig,
    /// Run settings
    pub settings: FileSettingsConfig,
    /// Inference server
    pub ollama: FileOllamaConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    ///
    /// Generation options are validated later, when personas are built.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ollama.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.ollama.host.trim().is_empty() {
            return Err(ConfigValidationError::EmptyHost);
        }

        for (field, model) in self.models.entries() {
            if model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(field));
            }
        }

        if self.settings.debates_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDebatesDir);
        }

        Ok(())
    }
}
