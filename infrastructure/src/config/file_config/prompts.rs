//! Persona system prompts from TOML (`[prompts]` section)

use serde::{Deserialize, Serialize};

/// Custom system prompts; unset entries use the built-in character prompts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    pub machiavelli: Option<String>,
    pub socrates: Option<String>,
    pub judge: Option<String>,
}
