//! LLM client module
//!
//! Provides the client trait, the OpenAI-compatible implementation, and the
//! `Gateway` the rest of the crate talks to.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gateway;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gateway::Gateway;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Only OpenAI-compatible providers are supported; Together AI, OpenAI and
/// local servers all speak the same protocol.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" | "together" => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::ServiceUnavailable(format!(
                "Unknown LLM provider: '{}'. Supported: openai, together",
                other
            )))
        }
    }
}
