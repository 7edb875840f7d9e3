//! Domain error types

use thiserror::Error;

/// Invalid persona or run parameters.
///
/// Raised while building [`PersonaSpec`](crate::PersonaSpec) and
/// [`ConversationPlan`](crate::ConversationPlan) values, always before any
/// inference call is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Persona id cannot be empty")]
    EmptyPersonaId,

    #[error("Persona `{persona}`: model name cannot be empty")]
    EmptyModel { persona: String },

    #[error("Persona `{persona}`: system prompt cannot be empty")]
    EmptySystemPrompt { persona: String },

    #[error("Persona `{persona}`: temperature {value} is outside [0.0, 2.0]")]
    TemperatureOutOfRange { persona: String, value: f64 },

    #[error("Persona `{persona}`: {field} must be a positive integer")]
    NonPositiveOption {
        persona: String,
        field: &'static str,
    },

    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Persona id `{0}` is used by more than one seat")]
    DuplicatePersona(String),
}

/// Input handed to the response parser was not text.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Response is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Violations of the append-only transcript contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Turn index {got} appended out of order (expected turn index {expected})")]
    OutOfOrder { expected: usize, got: usize },
}
