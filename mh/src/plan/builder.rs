//! Recommendation and schedule builder
//!
//! Renders the prompt, calls the gateway, parses the reply, and settles it
//! through the fallback policy. Nothing escapes as an error: every failure is
//! logged and replaced by the fixed collections.

use std::sync::Arc;

use tracing::{debug, warn};

use planstore::{RecommendationItem, ScheduleWeek};

use super::fallback::{self, SCHEDULE_WEEKS, Settled};
use super::parser;
use crate::config::{PlannerConfig, RecommendationSchema, ReplyFormat};
use crate::llm::Gateway;
use crate::prompts::{PromptContext, PromptLoader};

/// How many recommendations each schema asks the model for
fn recommendation_count(schema: RecommendationSchema) -> usize {
    match schema {
        RecommendationSchema::Simple => 5,
        RecommendationSchema::Extended => 6,
    }
}

pub struct Planner {
    gateway: Gateway,
    prompts: Arc<PromptLoader>,
    format: ReplyFormat,
    schema: RecommendationSchema,
}

impl Planner {
    pub fn new(gateway: Gateway, prompts: Arc<PromptLoader>, config: &PlannerConfig) -> Self {
        debug!(format = ?config.format, schema = ?config.schema, "Planner::new: called");
        Self {
            gateway,
            prompts,
            format: config.format,
            schema: config.schema,
        }
    }

    fn template(&self, base: &str) -> String {
        match self.format {
            ReplyFormat::Text => base.to_string(),
            ReplyFormat::Json => format!("{}-json", base),
        }
    }

    /// Render `template` and send it, logging and swallowing any failure
    async fn ask(&self, template: &str, context: &PromptContext) -> Option<String> {
        let prompt = match self.prompts.render(template, context) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(template, error = %e, "Failed to render prompt");
                return None;
            }
        };

        match self.gateway.prompt(&prompt).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(template, error = %e, "LLM request failed");
                None
            }
        }
    }

    /// Course recommendations for a learner
    pub async fn recommendations(&self, background: &str, goal: &str) -> Settled<RecommendationItem> {
        debug!(%background, %goal, "recommendations: called");
        let context = PromptContext::for_recommendations(
            background,
            goal,
            recommendation_count(self.schema),
            self.schema == RecommendationSchema::Extended,
        );

        let parsed = match self.ask(&self.template("recommendations"), &context).await {
            Some(reply) => match self.format {
                ReplyFormat::Text => parser::parse_pipe_lines(&reply, self.schema),
                ReplyFormat::Json => parser::parse_json_array(&reply).unwrap_or_default(),
            },
            None => Vec::new(),
        };

        fallback::settle_recommendations(parsed, self.schema)
    }

    /// A six-week schedule, steered by the recommendations already chosen
    pub async fn schedule(
        &self,
        background: &str,
        goal: &str,
        recommendations: &[RecommendationItem],
    ) -> Settled<ScheduleWeek> {
        debug!(%background, %goal, recommendation_count = recommendations.len(), "schedule: called");
        let context = PromptContext::for_schedule(background, goal, SCHEDULE_WEEKS, recommendations);

        let parsed = match self.ask(&self.template("schedule"), &context).await {
            Some(reply) => match self.format {
                ReplyFormat::Text => parser::parse_week_lines(&reply),
                ReplyFormat::Json => parser::parse_json_array(&reply).unwrap_or_default(),
            },
            None => Vec::new(),
        };

        fallback::settle_schedule(parsed, self.schema)
    }
}
