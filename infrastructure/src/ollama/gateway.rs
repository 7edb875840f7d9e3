//! Ollama LLM Gateway implementation

use crate::ollama::error::{OllamaError, Result};
use crate::ollama::protocol::{
    ChatRequest, ChatResponse, ErrorResponse, PullRequest, PullResponse, TagsResponse,
};
use async_trait::async_trait;
use court_application::ports::llm_gateway::{
    GatewayError, Generation, GenerationRequest, LlmGateway,
};
use court_domain::{TokenUsage, WireRole};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Host used when none is configured
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Upper bound for a single model download
const PULL_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// LLM Gateway implementation for an Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    /// Create a gateway for `host` with a per-request `timeout`.
    ///
    /// A host without a scheme is treated as `http://`.
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_host(host)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!("OllamaGateway initialized for {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn chat(&self, request: &GenerationRequest) -> Result<Generation> {
        let body = ChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: &request.options,
        };

        let response = self.client.post(self.url("/api/chat")).json(&body).send().await?;
        let chat: ChatResponse = read_json(response).await?;

        let message = chat.message.ok_or_else(|| {
            OllamaError::UnexpectedResponse("chat response has no message".to_string())
        })?;
        if message.role != WireRole::Assistant {
            debug!("Chat reply arrived with role {}", message.role.as_str());
        }

        let usage = match (chat.prompt_eval_count, chat.eval_count) {
            (None, None) => None,
            (prompt, completion) => Some(TokenUsage::new(
                prompt.unwrap_or(0),
                completion.unwrap_or(0),
            )),
        };

        Ok(Generation {
            content: message.content,
            usage,
        })
    }

    async fn tags(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.url("/api/tags")).send().await?;
        let tags: TagsResponse = read_json(response).await?;
        Ok(tags
            .models
            .iter()
            .filter_map(|m| m.display_name())
            .map(str::to_string)
            .collect())
    }

    async fn pull(&self, name: &str) -> Result<()> {
        let body = PullRequest {
            model: name,
            stream: false,
        };
        let response = self
            .client
            .post(self.url("/api/pull"))
            .timeout(PULL_TIMEOUT)
            .json(&body)
            .send()
            .await?;
        let pull: PullResponse = read_json(response).await?;

        if pull.status != "success" {
            return Err(OllamaError::UnexpectedResponse(format!(
                "pull of {} ended with status `{}`",
                name, pull.status
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<Generation, GatewayError> {
        debug!(
            "POST /api/chat model={} messages={}",
            request.model,
            request.messages.len()
        );
        Ok(self.chat(&request).await?)
    }

    async fn list_models(&self) -> std::result::Result<Vec<String>, GatewayError> {
        Ok(self.tags().await?)
    }

    async fn pull_model(&self, name: &str) -> std::result::Result<(), GatewayError> {
        info!("Pulling model {}", name);
        Ok(self.pull(name).await?)
    }
}

fn normalize_host(host: &str) -> Result<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(OllamaError::InvalidHost {
            host: host.to_string(),
            reason: "host is empty".to_string(),
        });
    }
    if host.contains("://") {
        if host.starts_with("http://") || host.starts_with("https://") {
            Ok(host.to_string())
        } else {
            Err(OllamaError::InvalidHost {
                host: host.to_string(),
                reason: "only http and https are supported".to_string(),
            })
        }
    } else {
        Ok(format!("http://{host}"))
    }
}

/// Decode a JSON body, turning non-2xx statuses into [`OllamaError::Api`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                if text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    text.trim().to_string()
                }
            });
        return Err(OllamaError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use court_domain::{ChatMessage, GenerationOptions};
    use mockito::Matcher;
    use serde_json::json;

    fn request(model: &str) -> GenerationRequest {
        GenerationRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: WireRole::System,
                    content: "You are Socrates.".to_string(),
                },
                ChatMessage {
                    role: WireRole::User,
                    content: "Power is order.".to_string(),
                },
            ],
            options: GenerationOptions::default(),
        }
    }

    fn gateway(server: &mockito::Server) -> OllamaGateway {
        OllamaGateway::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("localhost:11434").unwrap(), "http://localhost:11434");
        assert_eq!(
            normalize_host("http://127.0.0.1:11434/").unwrap(),
            "http://127.0.0.1:11434"
        );
        assert_eq!(normalize_host("https://ollama.lan").unwrap(), "https://ollama.lan");
        assert!(normalize_host("  ").is_err());
        assert!(normalize_host("ftp://ollama.lan").is_err());
    }

    #[tokio::test]
    async fn test_generate_sends_non_streaming_chat() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "qwen2.5-coder:7b",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "You are Socrates."},
                    {"role": "user", "content": "Power is order."}
                ],
                "options": {"num_ctx": 2048, "num_predict": 350}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "model": "qwen2.5-coder:7b",
                    "message": {"role": "assistant", "content": "<think>hm</think>Is it?"},
                    "done": true,
                    "prompt_eval_count": 42,
                    "eval_count": 7
                })
                .to_string(),
            )
            .create_async()
            .await;

        let generation = gateway(&server)
            .generate(request("qwen2.5-coder:7b"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(generation.content, "<think>hm</think>Is it?");
        assert_eq!(generation.usage, Some(TokenUsage::new(42, 7)));
    }

    #[tokio::test]
    async fn test_generate_without_counts_has_no_usage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":"Yes."},"done":true}"#)
            .create_async()
            .await;

        let generation = gateway(&server).generate(request("llama3")).await.unwrap();
        assert_eq!(generation.content, "Yes.");
        assert!(generation.usage.is_none());
    }

    #[tokio::test]
    async fn test_generate_missing_model() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'ghost' not found"}"#)
            .create_async()
            .await;

        let err = gateway(&server).generate(request("ghost")).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::ModelNotFound("model 'ghost' not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = gateway(&server).generate(request("llama3")).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_models() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models":[{"name":"llama3:latest","size":1},{"name":"qwen2.5-coder:7b"}]}"#)
            .create_async()
            .await;

        let models = gateway(&server).list_models().await.unwrap();
        assert_eq!(models, vec!["llama3:latest", "qwen2.5-coder:7b"]);
    }

    #[tokio::test]
    async fn test_pull_model() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/pull")
            .match_body(Matcher::Json(json!({"model": "llama3.2:latest", "stream": false})))
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        gateway(&server).pull_model("llama3.2:latest").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_pull_unknown_model_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/pull")
            .with_status(500)
            .with_body(r#"{"error":"pull model manifest: file does not exist"}"#)
            .create_async()
            .await;

        let err = gateway(&server).pull_model("ghost:1b").await.unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(m) if m.contains("file does not exist")));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let gateway = OllamaGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = gateway.list_models().await.unwrap_err();
        assert!(err.is_unreachable());
    }
}
