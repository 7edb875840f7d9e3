//! Ollama HTTP API wire types.
//!
//! Only the non-streaming forms of the endpoints are used:
//!
//! - `POST /api/chat`: one chat completion
//! - `GET /api/tags`: installed models
//! - `POST /api/pull`: download a model

use court_domain::{ChatMessage, GenerationOptions};
use serde::{Deserialize, Serialize};

/// `POST /api/chat` request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub options: &'a GenerationOptions,
}

/// `POST /api/chat` response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub done: bool,
    /// Tokens in the evaluated prompt
    pub prompt_eval_count: Option<u64>,
    /// Tokens generated
    pub eval_count: Option<u64>,
}

/// `GET /api/tags` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: String,
}

impl ModelEntry {
    /// The listed name, falling back to `model` for servers that omit it.
    pub fn display_name(&self) -> Option<&str> {
        [self.name.as_str(), self.model.as_str()]
            .into_iter()
            .find(|n| !n.is_empty())
    }
}

/// `POST /api/pull` request body
#[derive(Debug, Clone, Serialize)]
pub struct PullRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
}

/// `POST /api/pull` response body (non-streaming)
#[derive(Debug, Clone, Deserialize)]
pub struct PullResponse {
    #[serde(default)]
    pub status: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
