//! Application layer for ollama-court
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    llm_gateway::{GatewayError, Generation, GenerationRequest, LlmGateway},
    progress::{ConversationProgress, ModelPullProgress, NoProgress},
    transcript_sink::{SinkError, TranscriptSink},
};
pub use use_cases::prepare_models::{
    PrepareModelsError, PrepareModelsOutput, PrepareModelsUseCase, model_is_listed,
};
pub use use_cases::run_conversation::{
    ConversationOutcome, GenerationError, RunConversationError, RunConversationInput,
    RunConversationUseCase, RunTermination,
};
