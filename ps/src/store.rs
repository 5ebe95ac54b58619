//! Core PlanStore implementation

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::identity::is_valid_user_id;
use crate::record::{RecommendationItem, ScheduleWeek, UserRecord};

/// Errors raised while writing or listing records
///
/// Reads never surface these; a record that cannot be read is simply absent.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist record: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid user id: {0:?}")]
    InvalidId(String),
}

/// Summary of one stored record, used for listings
#[derive(Debug, Clone)]
pub struct RecordSummary {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub recommendation_count: usize,
    pub week_count: usize,
    pub expired: bool,
}

/// One JSON file per user id under a single directory
#[derive(Debug, Clone)]
pub struct PlanStore {
    base_path: PathBuf,
    ttl: Duration,
}

impl PlanStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened plan store");
        Ok(Self {
            base_path,
            ttl: Duration::days(crate::DEFAULT_TTL_DAYS),
        })
    }

    /// Replace the expiry threshold
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Location of the record file for `user_id`
    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id))
    }

    /// Write (or overwrite) the record for `user_id`
    pub fn put(
        &self,
        user_id: &str,
        recommendations: &[RecommendationItem],
        schedule: &[ScheduleWeek],
    ) -> Result<UserRecord, StoreError> {
        self.put_at(user_id, recommendations, schedule, Utc::now())
    }

    /// Write the record stamped with `now`
    ///
    /// Both timestamps are reset: a regenerated plan starts a fresh expiry window.
    /// Each writer fills its own temp file in the store directory and renames it
    /// over the record, so concurrent writers never share a partial file and the
    /// last rename wins.
    pub fn put_at(
        &self,
        user_id: &str,
        recommendations: &[RecommendationItem],
        schedule: &[ScheduleWeek],
        now: DateTime<Utc>,
    ) -> Result<UserRecord, StoreError> {
        if !is_valid_user_id(user_id) {
            return Err(StoreError::InvalidId(user_id.to_string()));
        }

        let record = UserRecord {
            user_id: user_id.to_string(),
            recommendations: recommendations.to_vec(),
            schedule: schedule.to_vec(),
            created_at: now,
            last_updated: now,
        };

        fs::create_dir_all(&self.base_path)?;
        let path = self.path_for(user_id);
        let mut temp = NamedTempFile::new_in(&self.base_path)?;
        temp.write_all(serde_json::to_string_pretty(&record)?.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path)?;

        info!(user_id, "Saved plan record");
        Ok(record)
    }

    /// Fetch a live record, or `None` if it is missing, unreadable, or expired
    pub fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.get_at(user_id, Utc::now())
    }

    /// Fetch a record as seen at time `now`
    pub fn get_at(&self, user_id: &str, now: DateTime<Utc>) -> Option<UserRecord> {
        if !is_valid_user_id(user_id) {
            debug!(user_id, "get_at: invalid id");
            return None;
        }

        let record = match self.read(user_id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(user_id, "get_at: no record");
                return None;
            }
            Err(e) => {
                warn!(user_id, error = %e, "Failed to load plan record");
                return None;
            }
        };

        if record.is_expired_at(now, self.ttl) {
            info!(user_id, created_at = %record.created_at, "Plan record expired");
            return None;
        }

        debug!(user_id, "get_at: hit");
        Some(record)
    }

    /// Summaries of every readable record, sorted by id
    pub fn list(&self) -> Result<Vec<RecordSummary>, StoreError> {
        self.list_at(Utc::now())
    }

    pub fn list_at(&self, now: DateTime<Utc>) -> Result<Vec<RecordSummary>, StoreError> {
        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let Some(user_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.read(user_id) {
                Ok(Some(record)) => summaries.push(RecordSummary {
                    expired: record.is_expired_at(now, self.ttl),
                    user_id: record.user_id,
                    created_at: record.created_at,
                    last_updated: record.last_updated,
                    recommendation_count: record.recommendations.len(),
                    week_count: record.schedule.len(),
                }),
                Ok(None) => {}
                Err(e) => warn!(?path, error = %e, "Skipping unreadable record"),
            }
        }

        summaries.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(summaries)
    }

    fn read(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let path = self.path_for(user_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
