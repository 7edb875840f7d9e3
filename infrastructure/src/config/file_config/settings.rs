//! Run settings from TOML (`[settings]` section)

use court_domain::{ConversationKind, GenerationOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettingsConfig {
    /// Rounds when `--rounds` is not given
    pub default_rounds: usize,
    pub num_predict: u32,
    pub temperature: f64,
    pub num_ctx: u32,
    /// Directory transcripts are written to
    pub debates_dir: PathBuf,
    /// `debate` or `dialogue`
    pub mode: ConversationKind,
    /// Topic when `--topic` is not given
    pub topic: Option<String>,
}

impl Default for FileSettingsConfig {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            default_rounds: 2,
            num_predict: options.num_predict,
            temperature: options.temperature,
            num_ctx: options.num_ctx,
            debates_dir: PathBuf::from("debates"),
            mode: ConversationKind::default(),
            topic: None,
        }
    }
}

impl FileSettingsConfig {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            num_ctx: self.num_ctx,
            num_predict: self.num_predict,
            temperature: self.temperature,
        }
    }
}
