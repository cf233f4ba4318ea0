//! OpenAI-compatible Chat Completions provider.
//!
//! Defaults to OpenRouter's endpoint, which fronts many models behind the
//! OpenAI wire format. Requests are non-streaming: the benchmark expects a bare
//! integer back, so generation is pinned to temperature 0 with a tiny token cap.

use crate::error::{Error, Result};
use crate::http::client::Client;
use crate::provider::{ChatOracle, Completion, Usage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);
const MAX_TOKENS: u32 = 8;
const TEMPERATURE: f32 = 0.0;
const REFERER: &str = "https://example.com";
const TITLE: &str = "Intent Matching Benchmark";

// ============================================================================
// OpenAI Provider
// ============================================================================

/// Chat Completions client bound to one model and credential.
pub struct OpenAIProvider {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a provider against the default endpoint.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            model: model.into(),
            api_key: api_key.into(),
            base_url: OPENROUTER_API_URL.to_string(),
        }
    }

    /// Create with a custom base URL (direct OpenAI, a proxy, a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, system: &str, user: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

impl ChatOracle for OpenAIProvider {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn complete(&self, system: &str, user: &str) -> Result<Completion> {
        let request_body = self.build_request(system, user);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&request_body)?
            .send()?;

        if !response.is_success() {
            return Err(Error::status(response.status(), response.into_text()));
        }

        parse_completion(response.text())
    }
}

/// Decode a non-streaming completion body into its first choice.
pub fn parse_completion(body: &str) -> Result<Completion> {
    let parsed: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("chat completion body: {e}")))?;

    let Some(choice) = parsed.choices.into_iter().next() else {
        return Err(Error::EmptyChoices);
    };

    tracing::debug!(
        id = parsed.id.as_deref().unwrap_or_default(),
        model = parsed.model.as_deref().unwrap_or_default(),
        finish_reason = choice.finish_reason.as_deref().unwrap_or_default(),
        "Chat completion received"
    );

    let usage = parsed.usage.unwrap_or_default();
    Ok(Completion {
        text: choice.message.content.unwrap_or_default().trim().to_string(),
        model: parsed.model,
        finish_reason: choice.finish_reason,
        usage: Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
    })
}

// ============================================================================
// OpenAI API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    id: Option<String>,
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    finish_reason: Option<String>,
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}
