//! Inference server settings from TOML (`[ollama]` section)

use crate::ollama::gateway::DEFAULT_HOST;
use serde::{Deserialize, Serialize};

/// Raw Ollama server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the server
    pub host: String,
    /// Timeout in seconds for one inference call
    pub timeout_seconds: u64,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout_seconds: 300,
        }
    }
}
