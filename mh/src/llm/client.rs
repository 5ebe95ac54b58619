//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client, each call is independent
///
/// Implementations are shared behind `Arc<dyn LlmClient>` so the planner, the
/// chatbot and tests can substitute their own.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full reply
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock LLM client for unit tests
    ///
    /// Replays canned results in order and records every prompt it receives.
    pub struct MockLlmClient {
        responses: Vec<Result<String, u16>>,
        call_count: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlmClient {
        pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
            debug!(response_count = %responses.len(), "MockLlmClient::new: called");
            Self {
                responses: responses.into_iter().map(|r| Ok(r.into())).collect(),
                call_count: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// A client whose every call fails with the given HTTP status
        pub fn failing(status: u16) -> Self {
            Self {
                responses: vec![Err(status); 8],
                call_count: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            debug!("MockLlmClient::complete: called");
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.extend(request.messages.into_iter().map(|m| m.content));
            }
            match self.responses.get(idx) {
                Some(Ok(text)) => Ok(CompletionResponse::text(text.clone())),
                Some(Err(status)) => Err(LlmError::ApiError {
                    status: *status,
                    message: "mock failure".to_string(),
                }),
                None => Err(LlmError::InvalidResponse("No more mock responses".to_string())),
            }
        }

        fn model(&self) -> &str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_responses() {
            let client = MockLlmClient::new(vec!["Response 1", "Response 2"]);

            let resp1 = client.complete(CompletionRequest::from_prompt("a", 100)).await.unwrap();
            assert_eq!(resp1.content.as_deref(), Some("Response 1"));

            let resp2 = client.complete(CompletionRequest::from_prompt("b", 100)).await.unwrap();
            assert_eq!(resp2.content.as_deref(), Some("Response 2"));

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.prompts(), vec!["a", "b"]);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(Vec::<String>::new());
            let result = client.complete(CompletionRequest::from_prompt("a", 100)).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_failing_mock() {
            let client = MockLlmClient::failing(503);
            let err = client.complete(CompletionRequest::from_prompt("a", 100)).await.unwrap_err();
            assert!(matches!(err, LlmError::ApiError { status: 503, .. }));
        }
    }
}
