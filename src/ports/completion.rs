//! Completion Provider Port - Interface for the model completion API.
//!
//! Abstracts the external chat-completion capability so the engine can build
//! requests without coupling to a specific vendor. The engine performs one
//! synchronous request per operation; there is no streaming and no retry
//! policy here. Failures surface as a [`CompletionError`] and the caller
//! decides what degradation applies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::coaching::{Message, MessageRole};

/// Port for model completion calls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generates a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError>;
}

/// Request metadata for tracing and diagnostics.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Trace id correlating logs for one logical operation.
    pub trace_id: String,
}

impl RequestMetadata {
    /// Creates metadata with an explicit trace id.
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }

    /// Creates metadata with a fresh trace id prefixed by the operation name.
    pub fn for_operation(operation: &str) -> Self {
        Self::new(format!("{}-{}", operation, Uuid::new_v4()))
    }
}

/// Request for a model completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier, chosen per feature by the configuration resolver.
    pub model: String,
    /// Ordered conversation messages, system message first.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Completion token budget.
    pub max_tokens: Option<u32>,
    /// Metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new request for a model.
    pub fn new(model: impl Into<String>, metadata: RequestMetadata) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            metadata,
        }
    }

    /// Adds a single message.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Replaces the message list with an already-built one.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the completion token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Creates zero usage.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Response from a model completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Token usage, when the provider reports it.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
}

/// Completion provider errors.
///
/// The profile generator treats every variant uniformly as "generation
/// failed"; the distinctions exist for diagnostics and for callers that
/// propagate instead of degrading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl CompletionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new("llama-3.3-70b-versatile", RequestMetadata::new("trace-1"))
            .with_message(MessageRole::System, "Be helpful")
            .with_message(MessageRole::User, "Hello")
            .with_temperature(0.7)
            .with_max_tokens(100);

        assert_eq!(request.model, "llama-3.3-70b-versatile");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.metadata.trace_id, "trace-1");
    }

    #[test]
    fn with_messages_replaces_list() {
        let request = CompletionRequest::new("m", RequestMetadata::new("t"))
            .with_message(MessageRole::User, "dropped")
            .with_messages(vec![Message::system("kept")]);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "kept");
    }

    #[test]
    fn metadata_for_operation_prefixes_trace_id() {
        let metadata = RequestMetadata::for_operation("profile-generation");
        assert!(metadata.trace_id.starts_with("profile-generation-"));
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(TokenUsage::zero().total_tokens, 0);
    }

    #[test]
    fn errors_display_their_detail() {
        assert_eq!(
            CompletionError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            CompletionError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
        assert!(CompletionError::network("connection reset")
            .to_string()
            .contains("connection reset"));
    }
}
