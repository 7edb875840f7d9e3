//! Transcript sinks
//!
//! Implements TranscriptSink for the local filesystem.

pub mod markdown;
