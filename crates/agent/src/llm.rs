//! Completion-service boundary.
//!
//! The pipeline treats the LLM as an opaque `prompt -> text` capability with
//! no retry or backoff layer; failures propagate as `CompletionError` and
//! are converted to fallback recommendations by the runtime.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use wayfarer_core::config::LlmConfig;
use wayfarer_core::errors::CompletionError;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Masks a credential for logging: first 7 characters, `***`, last 4.
/// Anything 11 characters or shorter is fully masked. Counts characters,
/// not bytes, so non-ASCII keys never split a code point.
pub fn mask_token(token: &str) -> String {
    let char_count = token.chars().count();
    if char_count <= 11 {
        return "***".to_string();
    }
    let head: String = token.chars().take(7).collect();
    let tail: String = token.chars().skip(char_count - 4).collect();
    format!("{head}***{tail}")
}

/// Client for OpenAI-compatible `/chat/completions` endpoints. Sends the
/// rendered prompt as a single user message, non-streaming.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| CompletionError::Transport("llm.api_key is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            api_key = %mask_token(self.api_key.expose_secret()),
            prompt_chars = prompt.len(),
            "completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|error| {
            CompletionError::Transport(format!("invalid completion payload: {error}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
