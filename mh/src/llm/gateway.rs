//! Gateway: one prompt in, one reply out
//!
//! The gateway is built once at startup and handed to whatever needs the model.
//! It may hold no client at all when credentials are missing; every call then
//! fails with `ServiceUnavailable` and callers fall back.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{CompletionRequest, LlmClient, LlmError, StopReason, create_client};
use crate::config::LlmConfig;

#[derive(Clone)]
pub struct Gateway {
    client: Option<Arc<dyn LlmClient>>,
    max_tokens: u32,
}

impl Gateway {
    pub fn new(client: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self {
            client: Some(client),
            max_tokens,
        }
    }

    /// A gateway without a client; every prompt fails
    pub fn unavailable() -> Self {
        Self {
            client: None,
            max_tokens: 0,
        }
    }

    /// Build from config, degrading to `unavailable` when no client can be made
    pub fn from_config(config: &LlmConfig) -> Self {
        debug!(provider = %config.provider, "Gateway::from_config: called");
        match create_client(config) {
            Ok(client) => Self::new(client, config.max_tokens),
            Err(e) => {
                warn!(error = %e, "LLM client not configured, fallback plans will be served");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Send `prompt` as a single user message and return the reply text
    ///
    /// A reply cut off at the token limit is still returned, since the parsers
    /// keep whatever complete lines it holds. A filtered reply is an error.
    pub async fn prompt(&self, prompt: &str) -> Result<String, LlmError> {
        let Some(client) = &self.client else {
            return Err(LlmError::ServiceUnavailable("no LLM client configured".to_string()));
        };
        debug!(model = %client.model(), prompt_len = prompt.len(), "Gateway::prompt: called");

        let response = client
            .complete(CompletionRequest::from_prompt(prompt, self.max_tokens))
            .await?;

        debug!(tokens = response.usage.total(), stop_reason = ?response.stop_reason, "Gateway::prompt: reply");

        match response.stop_reason {
            StopReason::EndTurn => {}
            StopReason::MaxTokens => warn!(max_tokens = self.max_tokens, "LLM reply truncated at token limit"),
            StopReason::ContentFilter => {
                return Err(LlmError::InvalidResponse("reply blocked by content filter".to_string()));
            }
        }

        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(LlmError::InvalidResponse("empty completion".to_string())),
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("model", &self.client.as_ref().map(|c| c.model().to_string()))
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, TokenUsage};
    use async_trait::async_trait;

    /// Replies once with a fixed response
    struct FixedClient(CompletionResponse);

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            Ok(self.0.clone())
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    fn stopped(reason: StopReason) -> Gateway {
        let response = CompletionResponse {
            content: Some("Week 1: a, b".to_string()),
            stop_reason: reason,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        };
        Gateway::new(Arc::new(FixedClient(response)), 512)
    }

    #[tokio::test]
    async fn test_prompt_returns_text() {
        let mock = Arc::new(MockLlmClient::new(vec!["hello there"]));
        let gateway = Gateway::new(mock.clone(), 512);

        assert_eq!(gateway.prompt("hi").await.unwrap(), "hello there");
        assert_eq!(mock.prompts(), vec!["hi"]);
    }

    #[tokio::test]
    async fn test_unavailable_gateway() {
        let gateway = Gateway::unavailable();
        assert!(!gateway.is_available());

        let err = gateway.prompt("hi").await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_empty_completion_is_invalid() {
        let gateway = Gateway::new(Arc::new(MockLlmClient::new(vec!["   "])), 512);
        assert!(matches!(
            gateway.prompt("hi").await,
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let gateway = Gateway::new(Arc::new(MockLlmClient::failing(500)), 512);
        assert!(matches!(
            gateway.prompt("hi").await,
            Err(LlmError::ApiError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_truncated_reply_is_kept() {
        assert_eq!(stopped(StopReason::MaxTokens).prompt("hi").await.unwrap(), "Week 1: a, b");
    }

    #[tokio::test]
    async fn test_filtered_reply_is_invalid() {
        assert!(matches!(
            stopped(StopReason::ContentFilter).prompt("hi").await,
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_from_config_without_key_is_unavailable() {
        let config = LlmConfig {
            api_key_env: "MENTORHUB_GATEWAY_TEST_KEY_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(!Gateway::from_config(&config).is_available());
    }
}
