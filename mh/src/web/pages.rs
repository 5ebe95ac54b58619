//! HTML pages
//!
//! Templates are compiled into the binary and rendered with Handlebars'
//! default HTML escaping. Escaping does not vet link targets: recommendation
//! URLs reach the page only after the fallback policy has kept them to http(s),
//! and an item without a URL renders as plain text.

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::plan::{PlanOutcome, Profile, SCHEDULE_WEEKS};

const INDEX: &str = include_str!("../../templates/index.hbs");
const RECOMMENDATIONS: &str = include_str!("../../templates/recommendations.hbs");

pub struct Pages {
    hbs: Handlebars<'static>,
}

#[derive(Serialize)]
struct IndexContext {
    weeks: usize,
    llm_available: bool,
}

#[derive(Serialize)]
struct RecommendationsContext<'a> {
    profile: &'a Profile,
    plan: &'a PlanOutcome,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string("index", INDEX)
            .context("Failed to compile index template")?;
        hbs.register_template_string("recommendations", RECOMMENDATIONS)
            .context("Failed to compile recommendations template")?;
        Ok(Self { hbs })
    }

    pub fn index(&self, llm_available: bool) -> Result<String> {
        debug!(%llm_available, "Pages::index: called");
        let context = IndexContext {
            weeks: SCHEDULE_WEEKS,
            llm_available,
        };
        self.hbs.render("index", &context).context("Failed to render index page")
    }

    pub fn recommendations(&self, profile: &Profile, plan: &PlanOutcome) -> Result<String> {
        debug!(user_id = %plan.user_id, "Pages::recommendations: called");
        self.hbs
            .render("recommendations", &RecommendationsContext { profile, plan })
            .context("Failed to render recommendations page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecommendationSchema;
    use crate::plan::fallback;
    use planstore::RecommendationItem;

    fn outcome() -> PlanOutcome {
        PlanOutcome {
            user_id: "0123456789ab".to_string(),
            recommendations: fallback::fallback_recommendations(RecommendationSchema::Extended),
            schedule: fallback::fallback_schedule(RecommendationSchema::Extended),
            cached: true,
        }
    }

    #[test]
    fn test_index_page() {
        let pages = Pages::new().unwrap();
        let html = pages.index(false).unwrap();
        assert!(html.contains("action=\"/recommendations\""));
        assert!(html.contains("6-week study plan"));
        assert!(html.contains("not configured"));
        assert!(!pages.index(true).unwrap().contains("not configured"));
    }

    #[test]
    fn test_recommendations_page() {
        let pages = Pages::new().unwrap();
        let profile = Profile::new("Ada", "CS undergrad", "become a data scientist");

        let html = pages.recommendations(&profile, &outcome()).unwrap();
        assert!(html.contains("Hi Ada"));
        assert!(html.contains("Web Development Basics"));
        assert!(html.contains("Week 6"));
        assert!(html.contains("Prepare for next phase"));
        assert!(html.contains("Showing your saved plan"));
    }

    #[test]
    fn test_simple_items_render() {
        let pages = Pages::new().unwrap();
        let profile = Profile::new("Ada", "cs", "ml");
        let plan = PlanOutcome {
            recommendations: fallback::fallback_recommendations(RecommendationSchema::Simple),
            ..outcome()
        };

        let html = pages.recommendations(&profile, &plan).unwrap();
        assert!(html.contains("Intro to Python"));
    }

    #[test]
    fn test_script_link_from_model_is_not_rendered() {
        let pages = Pages::new().unwrap();
        let profile = Profile::new("Ada", "cs", "ml");
        let items = vec![RecommendationItem::simple(
            "Click me",
            "javascript:alert(document.cookie)",
            "why",
        )];
        let plan = PlanOutcome {
            recommendations: fallback::settle_recommendations(items, RecommendationSchema::Simple).items,
            ..outcome()
        };

        let html = pages.recommendations(&profile, &plan).unwrap();
        assert!(!html.contains("javascript:"));
        assert!(html.contains("<strong>Click me</strong>"));
    }

    #[test]
    fn test_input_is_escaped() {
        let pages = Pages::new().unwrap();
        let profile = Profile::new("<script>alert(1)</script>", "cs", "ml");

        let html = pages.recommendations(&profile, &outcome()).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
