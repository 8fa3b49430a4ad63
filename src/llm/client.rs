//! LlmClient trait and a scripted mock for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::{Result, ScraprError};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client - each call is independent, no conversation memory.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// The model this client talks to
    fn model(&self) -> &str;

    /// Whether the client is configured well enough to make calls
    fn is_ready(&self) -> bool;
}

/// Mock client that replays scripted responses in order and counts calls.
#[derive(Debug)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    calls: AtomicU32,
}

impl MockLlmClient {
    /// Create a mock that will return the given results, one per call.
    pub fn new(responses: Vec<Result<CompletionResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// How many completion calls were made.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ScraprError::OracleUnavailable(
                    "mock response script exhausted".to_string(),
                ))
            })
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockLlmClient::new(vec![
            Ok(CompletionResponse::text("first")),
            Ok(CompletionResponse::text("second")),
        ]);

        let a = mock.complete(CompletionRequest::default()).await.unwrap();
        let b = mock.complete(CompletionRequest::default()).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_returns_scripted_error() {
        let mock = MockLlmClient::new(vec![Err(ScraprError::OracleUnavailable(
            "rate limited".to_string(),
        ))]);

        let err = mock
            .complete(CompletionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScraprError::OracleUnavailable(_)));
    }

    #[tokio::test]
    async fn test_mock_exhausted_script_errors() {
        let mock = MockLlmClient::new(vec![]);
        let err = mock
            .complete(CompletionRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exhausted"));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_mock_metadata() {
        let mock = MockLlmClient::new(vec![]);
        assert!(mock.is_ready());
        assert_eq!(mock.model(), "mock-model");
    }
}
