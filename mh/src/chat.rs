//! Mentor chatbot

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::{Gateway, LlmError};
use crate::prompts::{PromptContext, PromptLoader};

pub struct ChatBot {
    gateway: Gateway,
    prompts: Arc<PromptLoader>,
}

impl ChatBot {
    pub fn new(gateway: Gateway, prompts: Arc<PromptLoader>) -> Self {
        Self { gateway, prompts }
    }

    /// Answer a learner's question as an HTML fragment
    ///
    /// Failures become a readable message in the reply instead of an error.
    pub async fn reply(&self, message: &str) -> String {
        debug!(message_len = message.len(), "ChatBot::reply: called");

        let raw = match self.prompts.render("chat", &PromptContext::for_chat(message)) {
            Ok(prompt) => match self.gateway.prompt(&prompt).await {
                Ok(text) => text,
                Err(e) => error_message(&e),
            },
            Err(e) => {
                warn!(error = %e, "Failed to render chat prompt");
                format!("Error generating response: {}", e)
            }
        };

        format_reply(&raw)
    }
}

fn error_message(e: &LlmError) -> String {
    warn!(error = %e, "Chat request failed");
    if e.is_unavailable() {
        "AI service not available. Please check your API configuration.".to_string()
    } else {
        format!("Error generating response: {}", e)
    }
}

/// Escape the model text and turn bullets into HTML line breaks
pub fn format_reply(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    let formatted = escaped.replace('•', "<br>•").replace("- ", "<br>• ");
    match formatted.strip_prefix("<br>") {
        Some(rest) => rest.to_string(),
        None => formatted,
    }
}
