//! Error types for the Ollama adapter

use court_application::ports::llm_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when communicating with an Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Invalid Ollama host {host}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode Ollama response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<OllamaError> for GatewayError {
    fn from(error: OllamaError) -> Self {
        match error {
            OllamaError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OllamaError::Http(e) if e.is_connect() => {
                GatewayError::ConnectionError(e.to_string())
            }
            OllamaError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            OllamaError::Api {
                status: 404,
                message,
            } => GatewayError::ModelNotFound(message),
            e @ OllamaError::Api { .. } => GatewayError::RequestFailed(e.to_string()),
            e @ (OllamaError::Decode(_) | OllamaError::UnexpectedResponse(_)) => {
                GatewayError::InvalidResponse(e.to_string())
            }
            e @ OllamaError::InvalidHost { .. } => GatewayError::ConnectionError(e.to_string()),
        }
    }
}
