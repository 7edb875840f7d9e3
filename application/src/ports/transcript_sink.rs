//! Transcript sink port
//!
//! Receives a rendered transcript document and stores it somewhere.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a transcript
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write transcript {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for finished (or partial) transcripts
pub trait TranscriptSink: Send + Sync {
    /// Store `document` under `file_name`, returning where it landed.
    fn persist(&self, file_name: &str, document: &str) -> Result<PathBuf, SinkError>;
}
