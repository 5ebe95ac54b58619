//! Fallback policy
//!
//! Whatever the model returns, callers always get a usable plan. Parsed output
//! is normalized first; when too little survives, a fixed collection stands in.

use tracing::{debug, warn};

use planstore::{RecommendationItem, ScheduleWeek};

use crate::config::RecommendationSchema;

/// Length of every schedule handed to callers
pub const SCHEDULE_WEEKS: usize = 6;

/// Items plus whether they came from the fixed fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    pub items: Vec<T>,
    pub fallback: bool,
}

impl<T> Settled<T> {
    pub fn parsed(items: Vec<T>) -> Self {
        Self { items, fallback: false }
    }

    pub fn fallback(items: Vec<T>) -> Self {
        Self { items, fallback: true }
    }
}

/// The fixed recommendations for a schema
pub fn fallback_recommendations(schema: RecommendationSchema) -> Vec<RecommendationItem> {
    match schema {
        RecommendationSchema::Simple => vec![
            RecommendationItem::simple(
                "Intro to Python",
                "https://www.learnpython.org/",
                "Build fundamentals for automation, data and AI.",
            ),
            RecommendationItem::simple(
                "Khan Academy – Algebra & Statistics",
                "https://www.khanacademy.org/math",
                "Strengthen the math base needed for analytics/ML.",
            ),
        ],
        RecommendationSchema::Extended => vec![
            RecommendationItem {
                title: "Introduction to Programming".to_string(),
                url: "https://www.codecademy.com/learn/introduction-to-programming".to_string(),
                platform: "Codecademy".to_string(),
                duration: "20 hours".to_string(),
                level: "Beginner".to_string(),
                rating: "4.5+".to_string(),
                desc: "Learn programming fundamentals and basic concepts".to_string(),
                why: "Build essential programming skills for your career".to_string(),
            },
            RecommendationItem {
                title: "Web Development Basics".to_string(),
                url: "https://www.freecodecamp.org/".to_string(),
                platform: "freeCodeCamp".to_string(),
                duration: "Self-paced".to_string(),
                level: "Beginner".to_string(),
                rating: "4.8".to_string(),
                desc: "HTML, CSS, and JavaScript fundamentals".to_string(),
                why: "Create interactive web applications".to_string(),
            },
        ],
    }
}

/// The fixed six-week schedule for a schema
pub fn fallback_schedule(schema: RecommendationSchema) -> Vec<ScheduleWeek> {
    let weeks: [&[&str]; SCHEDULE_WEEKS] = match schema {
        RecommendationSchema::Simple => [
            &["Establish baseline skills and pick a clear goal"],
            &["Do 3 fundamentals tutorials relevant to your goal"],
            &["Start a tiny project; document learnings"],
            &["Study 2 deeper resources; iterate project"],
            &["Share work for feedback; refine"],
            &["Prepare a small portfolio artifact and next steps"],
        ],
        RecommendationSchema::Extended => [
            &["Complete programming basics", "Practice coding exercises"],
            &["Learn HTML and CSS", "Build first webpage"],
            &["Study JavaScript fundamentals", "Create interactive elements"],
            &["Build a complete project", "Deploy your work"],
            &["Learn advanced concepts", "Work on portfolio"],
            &["Final project completion", "Prepare for next phase"],
        ],
    };

    weeks
        .iter()
        .zip(1u32..)
        .map(|(items, week)| ScheduleWeek::new(week, items.iter().copied()))
        .collect()
}

/// Whether `url` is an absolute http(s) link
pub fn is_web_url(url: &str) -> bool {
    let url = url.trim();
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.get(..scheme.len()).is_some_and(|p| p.eq_ignore_ascii_case(scheme)))
}

/// Keep items with a title; fall back when none remain
///
/// Links other than http(s) are blanked so pages never render them as anchors.
pub fn settle_recommendations(
    parsed: Vec<RecommendationItem>,
    schema: RecommendationSchema,
) -> Settled<RecommendationItem> {
    let items: Vec<_> = parsed
        .into_iter()
        .filter(|i| !i.title.trim().is_empty())
        .map(|mut i| {
            if !is_web_url(&i.url) {
                if !i.url.is_empty() {
                    warn!(title = %i.title, url = %i.url, "Dropping non-web link from recommendation");
                }
                i.url = String::new();
            }
            i
        })
        .collect();

    if items.is_empty() {
        warn!("No usable recommendations parsed, using fallback");
        return Settled::fallback(fallback_recommendations(schema));
    }

    debug!(count = items.len(), "settle_recommendations: parsed items kept");
    Settled::parsed(items)
}

/// Normalize a parsed schedule to weeks 1..=6 in order; fall back when short
///
/// Out-of-range weeks are dropped and the first entry wins for a repeated week.
pub fn settle_schedule(parsed: Vec<ScheduleWeek>, schema: RecommendationSchema) -> Settled<ScheduleWeek> {
    let mut weeks: Vec<_> = parsed
        .into_iter()
        .filter(|w| (1..=SCHEDULE_WEEKS as u32).contains(&w.week))
        .collect();
    weeks.sort_by_key(|w| w.week);
    weeks.dedup_by_key(|w| w.week);

    if weeks.len() < SCHEDULE_WEEKS {
        warn!(weeks = weeks.len(), "Parsed schedule too short, using fallback");
        return Settled::fallback(fallback_schedule(schema));
    }

    debug!("settle_schedule: parsed schedule kept");
    Settled::parsed(weeks)
}
