//! Mock Completion Provider for testing.
//!
//! Configurable mock implementation of the CompletionProvider port so tests
//! can run without calling the real API.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_response(r#"{"coaching_tone": "warm"}"#)
//!     .with_error(CompletionError::network("connection reset"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, TokenUsage,
};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String, usage: TokenUsage },
    /// Return an error.
    Error(CompletionError),
}

/// Mock completion provider for testing.
///
/// Responses are consumed in configuration order; an exhausted queue yields
/// a canned success so incidental calls don't fail the test. Every request
/// is captured for verification.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionProvider {
    /// Creates a new mock provider with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, TokenUsage::new(10, 20))
    }

    /// Adds a successful response with explicit usage.
    pub fn with_response_full(self, content: impl Into<String>, usage: TokenUsage) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Success {
            content: content.into(),
            usage,
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets a simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the captured requests so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many times `complete` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let model = request.model.clone();
        self.calls.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success { content, usage }) => Ok(CompletionResponse {
                content,
                usage,
                model,
            }),
            Some(MockResponse::Error(error)) => Err(error),
            None => Ok(CompletionResponse {
                content: "Mock response".to_string(),
                usage: TokenUsage::zero(),
                model,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coaching::MessageRole;
    use crate::ports::RequestMetadata;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new("mock-model", RequestMetadata::new("trace"))
            .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let provider = MockCompletionProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("b")).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn errors_are_injected_in_order() {
        let provider = MockCompletionProvider::new()
            .with_error(CompletionError::network("down"))
            .with_response("recovered");

        assert!(provider.complete(request("a")).await.is_err());
        assert!(provider.complete(request("b")).await.is_ok());
    }

    #[tokio::test]
    async fn exhausted_queue_yields_canned_success() {
        let provider = MockCompletionProvider::new();
        let response = provider.complete(request("a")).await.unwrap();
        assert_eq!(response.content, "Mock response");
        assert_eq!(response.model, "mock-model");
    }

    #[tokio::test]
    async fn calls_are_captured_for_verification() {
        let provider = MockCompletionProvider::new().with_response("ok");
        provider.complete(request("what was sent")).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        let calls = provider.calls();
        assert_eq!(calls[0].messages[0].content, "what was sent");
    }
}
