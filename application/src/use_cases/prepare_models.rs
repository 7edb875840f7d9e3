//! Prepare Models use case
//!
//! Makes sure the inference server is reachable and every persona model is
//! installed, pulling the missing ones.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ModelPullProgress, NoProgress};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while preparing models
#[derive(Error, Debug)]
pub enum PrepareModelsError {
    #[error("Inference server is not reachable: {0}")]
    Unreachable(#[source] GatewayError),

    #[error("Failed to list installed models: {0}")]
    ListFailed(#[source] GatewayError),

    #[error("Failed to pull model {model}: {source}")]
    PullFailed {
        model: String,
        #[source]
        source: GatewayError,
    },
}

/// Result of a successful preparation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrepareModelsOutput {
    /// Models that were already installed
    pub present: Vec<String>,
    /// Models that had to be pulled
    pub pulled: Vec<String>,
}

/// Whether `model` is covered by the installed `listed` names.
///
/// A model is present when listed exactly, or when a listed name is its
/// base name with some tag (`llama3` matches `llama3:8b`).
pub fn model_is_listed(model: &str, listed: &[String]) -> bool {
    let base = model.split(':').next().unwrap_or(model);
    let tagged = format!("{base}:");
    listed
        .iter()
        .any(|name| name == model || name.starts_with(&tagged))
}

/// Use case for checking and pulling persona models
pub struct PrepareModelsUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> PrepareModelsUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, models: &[String]) -> Result<PrepareModelsOutput, PrepareModelsError> {
        self.execute_with_progress(models, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        models: &[String],
        progress: &dyn ModelPullProgress,
    ) -> Result<PrepareModelsOutput, PrepareModelsError> {
        let listed = self.gateway.list_models().await.map_err(|e| {
            if e.is_unreachable() {
                PrepareModelsError::Unreachable(e)
            } else {
                PrepareModelsError::ListFailed(e)
            }
        })?;
        debug!("Server lists {} models", listed.len());

        let mut output = PrepareModelsOutput::default();
        for model in models {
            if output.present.contains(model) || output.pulled.contains(model) {
                continue;
            }
            if model_is_listed(model, &listed) {
                output.present.push(model.clone());
                continue;
            }

            info!("Model {} not found, pulling", model);
            progress.on_pull_start(model);
            match self.gateway.pull_model(model).await {
                Ok(()) => {
                    progress.on_pull_complete(model, true);
                    output.pulled.push(model.clone());
                }
                Err(source) => {
                    warn!("Pull of {} failed: {}", model, source);
                    progress.on_pull_complete(model, false);
                    return Err(PrepareModelsError::PullFailed {
                        model: model.clone(),
                        source,
                    });
                }
            }
        }

        Ok(output)
    }
}
