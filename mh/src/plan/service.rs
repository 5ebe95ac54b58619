//! Cache-aware planning
//!
//! Looks the learner up by identity hash, serves the stored plan when it is
//! still live, and otherwise generates, persists, and returns a fresh one.
//! Store reads and writes are blocking file I/O and run on tokio's blocking pool.
//!
//! A plan made entirely of fallback collections is returned but not stored, so
//! the next request for that learner tries the model again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use planstore::{PlanStore, RecommendationItem, ScheduleWeek, UserRecord, identity};

use super::builder::Planner;

/// What a learner typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub background: String,
    pub goal: String,
}

impl Profile {
    /// Build a profile with surrounding whitespace removed
    pub fn new(name: &str, background: &str, goal: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            background: background.trim().to_string(),
            goal: goal.trim().to_string(),
        }
    }

    pub fn user_id(&self) -> String {
        identity::user_id(&self.name, &self.background, &self.goal)
    }
}

/// A plan as handed to the web layer or CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutcome {
    pub user_id: String,
    pub recommendations: Vec<RecommendationItem>,
    pub schedule: Vec<ScheduleWeek>,
    /// Served from the store without calling the model
    pub cached: bool,
}

pub struct MentorService {
    planner: Planner,
    store: PlanStore,
}

impl MentorService {
    pub fn new(planner: Planner, store: PlanStore) -> Self {
        Self { planner, store }
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// Whether a live plan is stored for this profile
    pub async fn has_cached(&self, profile: &Profile) -> bool {
        self.load(&profile.user_id()).await.is_some()
    }

    /// Return the learner's plan, generating it on a miss or when asked to
    pub async fn plan(&self, profile: &Profile, regenerate: bool) -> PlanOutcome {
        let user_id = profile.user_id();
        debug!(%user_id, %regenerate, "plan: called");

        if !regenerate && let Some(record) = self.load(&user_id).await {
            info!(%user_id, "Serving cached plan");
            return PlanOutcome {
                user_id,
                recommendations: record.recommendations,
                schedule: record.schedule,
                cached: true,
            };
        }

        info!(%user_id, %regenerate, "Generating new plan");
        let recommendations = self.planner.recommendations(&profile.background, &profile.goal).await;
        let schedule = self
            .planner
            .schedule(&profile.background, &profile.goal, &recommendations.items)
            .await;

        if recommendations.fallback && schedule.fallback {
            warn!(%user_id, "Plan is all fallback, not storing it");
        } else {
            self.save(&user_id, &recommendations.items, &schedule.items).await;
        }

        PlanOutcome {
            user_id,
            recommendations: recommendations.items,
            schedule: schedule.items,
            cached: false,
        }
    }

    async fn load(&self, user_id: &str) -> Option<UserRecord> {
        let store = self.store.clone();
        let id = user_id.to_string();
        match tokio::task::spawn_blocking(move || store.get(&id)).await {
            Ok(record) => record,
            Err(e) => {
                warn!(user_id, error = %e, "Store lookup task failed");
                None
            }
        }
    }

    async fn save(&self, user_id: &str, recommendations: &[RecommendationItem], schedule: &[ScheduleWeek]) {
        let store = self.store.clone();
        let id = user_id.to_string();
        let recommendations = recommendations.to_vec();
        let schedule = schedule.to_vec();

        match tokio::task::spawn_blocking(move || store.put(&id, &recommendations, &schedule)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(user_id, error = %e, "Failed to persist plan"),
            Err(e) => warn!(user_id, error = %e, "Store write task failed"),
        }
    }
}
