//! Persona model selection from TOML (`[models]` section)

use serde::{Deserialize, Serialize};

/// Model served to each seat
///
/// # Example
///
/// ```toml
/// [models]
/// machiavelli = "llama3:latest"
/// socrates = "qwen2.5-coder:7b"
/// judge = "llama3.2:latest"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for the pragmatist (persona A)
    pub machiavelli: String,
    /// Model for the questioner (persona B)
    pub socrates: String,
    /// Model for the judge
    pub judge: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            machiavelli: "llama3:latest".to_string(),
            socrates: "qwen2.5-coder:7b".to_string(),
            judge: "llama3.2:latest".to_string(),
        }
    }
}

impl FileModelsConfig {
    /// `(field, value)` pairs, for validation messages.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("machiavelli", self.machiavelli.as_str()),
            ("socrates", self.socrates.as_str()),
            ("judge", self.judge.as_str()),
        ]
    }
}
