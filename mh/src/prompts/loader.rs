//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use planstore::RecommendationItem;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// The parts of a recommendation that are fed back into the schedule prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub title: String,
    pub platform: String,
    pub duration: String,
}

impl From<&RecommendationItem> for CourseSummary {
    fn from(item: &RecommendationItem) -> Self {
        Self {
            title: item.title.clone(),
            platform: item.platform.clone(),
            duration: item.duration.clone(),
        }
    }
}

/// Context for rendering prompt templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    pub background: String,
    pub goal: String,
    /// Number of recommendations to ask for
    pub count: usize,
    /// Number of schedule weeks to ask for
    pub weeks: usize,
    /// Request the extended recommendation fields
    pub extended: bool,
    pub recommendations: Vec<CourseSummary>,
    /// Chat question
    pub message: String,
}

impl PromptContext {
    /// Context for a recommendations prompt
    pub fn for_recommendations(background: &str, goal: &str, count: usize, extended: bool) -> Self {
        Self {
            background: background.to_string(),
            goal: goal.to_string(),
            count,
            extended,
            ..Default::default()
        }
    }

    /// Context for a schedule prompt, biased toward the given recommendations
    pub fn for_schedule(background: &str, goal: &str, weeks: usize, recommendations: &[RecommendationItem]) -> Self {
        debug!(
            recommendation_count = recommendations.len(),
            "PromptContext::for_schedule: called"
        );
        Self {
            background: background.to_string(),
            goal: goal.to_string(),
            weeks,
            recommendations: recommendations.iter().map(CourseSummary::from).collect(),
            ..Default::default()
        }
    }

    /// Context for a chat prompt
    pub fn for_chat(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Default::default()
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (`{name}.pmt`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that prefers templates found in `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let exists = dir.is_dir();
        debug!(?dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            user_dir: if exists { Some(dir.to_path_buf()) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            user_dir: None,
        }
    }

    /// Create a loader from an optional override directory
    pub fn from_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::embedded_only(),
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text sent to the model, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{user_dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        info!("Rendering prompt template '{}'", template_name);

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}
