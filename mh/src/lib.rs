//! MentorHub - AI learning mentor
//!
//! Asks an LLM for course recommendations and a six-week study schedule,
//! parses whatever comes back into typed records, caches the result per
//! learner in a [`planstore::PlanStore`], and serves it over HTTP.
//!
//! Every generation failure degrades to a fixed fallback plan, so callers
//! always get something to show.

pub mod chat;
pub mod cli;
pub mod config;
pub mod llm;
pub mod plan;
pub mod prompts;
pub mod web;

// Re-export commonly used types
pub use chat::ChatBot;
pub use config::{Config, LlmConfig, PlannerConfig, RecommendationSchema, ReplyFormat};
pub use llm::{CompletionRequest, CompletionResponse, Gateway, LlmClient, LlmError, OpenAIClient, create_client};
pub use plan::{MentorService, PlanOutcome, Planner, Profile, SCHEDULE_WEEKS, Settled};
pub use prompts::{PromptContext, PromptLoader};
pub use web::{AppState, Pages};
