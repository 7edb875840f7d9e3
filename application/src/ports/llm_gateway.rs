//! LLM Gateway port
//!
//! Defines the interface for communicating with the inference server.

use async_trait::async_trait;
use court_domain::{ChatMessage, GenerationOptions, TokenUsage};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GatewayError::ConnectionError(_) | GatewayError::Timeout)
    }
}

/// One chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    /// Full payload: system message first, then the persona's history
    pub messages: Vec<ChatMessage>,
    pub options: GenerationOptions,
}

/// Raw output of one inference call
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub content: String,
    /// Provider-reported counts, when the server sends them
    pub usage: Option<TokenUsage>,
}

impl Generation {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the inference
/// server. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one non-streaming chat completion
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, GatewayError>;

    /// Names of the models installed on the server
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;

    /// Download a model onto the server
    async fn pull_model(&self, name: &str) -> Result<(), GatewayError>;
}
