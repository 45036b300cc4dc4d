//! Model Gateway Module
//!
//! Wraps a single call to the external language model and races it against
//! a timer. Whichever finishes first decides the outcome; a call that loses
//! the race is dropped and its result is never observed. There are no
//! retries here, callers decide what to substitute on failure.

mod gemini;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub use gemini::{GeminiClient, DEFAULT_API_URL, DEFAULT_MODEL};

// == Generation Params ==
/// Sampling hints forwarded to the model unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl GenerationParams {
    /// Short, moderately creative answers for the chat assistant.
    pub fn chat() -> Self {
        Self {
            max_output_tokens: Some(1024),
            temperature: Some(0.7),
            top_p: Some(0.9),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none() && self.top_p.is_none()
    }
}

// == Generation Request ==
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

// == Gateway Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The timer fired before the model answered
    #[error("API request timed out after {after_ms}ms")]
    TimedOut { after_ms: u64 },

    /// The model call itself failed (network, auth, quota, bad response)
    #[error("{0}")]
    CallFailed(String),

    /// No API credentials are configured
    #[error("Model API key is not configured")]
    NotConfigured,
}

// == Language Model ==
/// A text-in, text-out generative model.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Model name, used in logs.
    fn name(&self) -> &str;

    /// Generates free-form text for the prompt. No format guarantees.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}

// == Model Gateway ==
/// Timeout-bounded access to a [`LanguageModel`].
#[derive(Clone)]
pub struct ModelGateway {
    model: Arc<dyn LanguageModel>,
}

impl ModelGateway {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    // == Generate ==
    /// Sends the request and waits at most `timeout` for the raw text.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        timeout: Duration,
    ) -> Result<String, GatewayError> {
        let started = Instant::now();
        let call = self.model.generate(request);

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(text)) => {
                debug!(
                    model = self.model.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    chars = text.len(),
                    "model responded"
                );
                Ok(text)
            }
            Ok(Err(e)) => {
                warn!(model = self.model.name(), error = %e, "model call failed");
                Err(e)
            }
            Err(_) => {
                let after_ms = timeout.as_millis() as u64;
                warn!(model = self.model.name(), after_ms, "model call timed out");
                Err(GatewayError::TimedOut { after_ms })
            }
        }
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model", &self.model.name())
            .finish()
    }
}
