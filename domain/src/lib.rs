//! Domain layer for ollama-court
//!
//! This crate contains the core conversation model: personas, their
//! message histories, reply parsing, turn sequencing and transcripts.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Personas and seats
//!
//! A [`PersonaSpec`] is pure data (model, system prompt, generation
//! options). A [`Topology`] seats personas:
//!
//! - **Dialogue**: persona A and persona B alternate replies
//! - **Debate**: a pragmatist and a questioner argue, then a judge rules
//!
//! ## Thought blocks
//!
//! Models may wrap private reasoning in `<think>...</think>`.
//! [`ResponseParser`] separates those blocks from the visible reply; only
//! the visible reply is ever fed back to another persona.

pub mod conversation;
pub mod core;
pub mod persona;
pub mod prompt;
pub mod response;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use conversation::{
    state::TurnState,
    topology::{ConversationKind, ConversationPlan, Topology},
};
pub use core::{
    error::{ConfigurationError, ParseError, TranscriptError},
    string::{collapse_blank_lines, truncate},
};
pub use persona::spec::{GenerationOptions, PersonaSpec, Seat};
pub use prompt::PromptTemplate;
pub use response::parser::{ParsedResponse, ResponseParser};
pub use session::entities::{ChatMessage, Message, PersonaSession, Role, WireRole};
pub use transcript::{
    entities::{TokenUsage, Transcript, TurnRecord},
    filename::{topic_slug, transcript_file_name},
    recorder::{DisplayBlock, Participant, RunHeader, RunStatus, TranscriptRecorder},
};
