//! Groq Provider - Implementation of CompletionProvider for Groq's API.
//!
//! Groq exposes an OpenAI-compatible chat-completions endpoint hosting the
//! Llama models the feature catalog names. One request, one response; the
//! engine has no retry policy, so transient failures surface as typed
//! errors and the caller's fallback contract applies.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let provider = GroqProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::coaching::MessageRole;
use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, TokenUsage,
};

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq API provider implementation.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    /// Creates a new Groq provider with the given configuration.
    pub fn new(config: GroqConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_wire_request(request: &CompletionRequest) -> ChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| WireMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            })
            .collect();

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Maps an error status to a typed completion error.
    fn classify_status(status: StatusCode, retry_after: Option<u32>, body: &str) -> CompletionError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => {
                CompletionError::rate_limited(retry_after.unwrap_or(60))
            }
            status if status.is_server_error() => {
                CompletionError::unavailable(format!("server returned {}", status))
            }
            status => CompletionError::network(format!("unexpected status {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        if request.messages.is_empty() {
            return Err(CompletionError::InvalidRequest(
                "request has no messages".to_string(),
            ));
        }

        let wire_request = Self::to_wire_request(&request);
        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("connection failed: {}", e))
                } else {
                    CompletionError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u32>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, retry_after, &body));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(format!("invalid response body: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::parse("response contained no choices"))?;

        let usage = body
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            total_tokens = usage.total_tokens,
            "completion request succeeded"
        );

        Ok(CompletionResponse {
            content,
            usage,
            model: body.model.unwrap_or(request.model),
        })
    }
}

// Wire types for the OpenAI-compatible chat completions endpoint.

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
