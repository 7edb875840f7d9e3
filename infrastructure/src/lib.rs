//! Infrastructure layer for ollama-court
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod ollama;
pub mod sink;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileModelsConfig, FileOllamaConfig,
    FileOutputConfig, FilePromptsConfig, FileSettingsConfig,
};
pub use ollama::{
    error::{OllamaError, Result},
    gateway::{DEFAULT_HOST, OllamaGateway},
};
pub use sink::markdown::MarkdownFileSink;
