//! Presentation-level configuration
//!
//! Configuration for how turns and results are shown.

use crate::cli::commands::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show a short preview of each turn's thought blocks
    pub show_thoughts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_thoughts: true,
        }
    }
}

impl OutputConfig {
    /// Whether each turn is printed as soon as it completes.
    pub fn prints_turns(&self) -> bool {
        self.format == OutputFormat::Full
    }
}
