//! Persisted record types
//!
//! Field names match the on-disk JSON layout. Deserialization is lenient so the
//! same types can be read straight out of model-produced JSON arrays, where
//! ratings arrive as numbers and week numbers as strings.

use chrono::{DateTime, Duration, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A recommended course or learning resource
///
/// The simple schema only fills `title`, `url` and `why`; the remaining fields
/// stay empty and are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub platform: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub duration: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub level: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub rating: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub desc: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub why: String,
}

impl RecommendationItem {
    /// Create an item carrying only the simple-schema fields
    pub fn simple(title: impl Into<String>, url: impl Into<String>, why: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            why: why.into(),
            ..Default::default()
        }
    }
}

/// One week of the study schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWeek {
    #[serde(deserialize_with = "lenient_week")]
    pub week: u32,

    #[serde(default)]
    pub items: Vec<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub progress: u32,
}

impl ScheduleWeek {
    /// Create a fresh, not-yet-started week
    pub fn new<I, S>(week: u32, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            week,
            items: items.into_iter().map(Into::into).collect(),
            completed: false,
            progress: 0,
        }
    }
}

/// Everything cached for one identity hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub recommendations: Vec<RecommendationItem>,
    pub schedule: Vec<ScheduleWeek>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl UserRecord {
    /// A record is stale once it is at least `ttl` old
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a string, found {}", other))),
    }
}

fn lenient_week<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| D::Error::custom(format!("week out of range: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| D::Error::custom(format!("invalid week '{}': {}", s, e))),
        other => Err(D::Error::custom(format!("expected a week number, found {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_item_omits_extended_fields() {
        let item = RecommendationItem::simple("Intro to Python", "https://www.learnpython.org/", "Fundamentals");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["title"], "Intro to Python");
        assert_eq!(json["why"], "Fundamentals");
        assert!(json.get("platform").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_item_accepts_numeric_rating() {
        let item: RecommendationItem = serde_json::from_str(
            r#"{"title": "ML", "url": "https://x", "platform": "Coursera", "rating": 4.8, "why": "core"}"#,
        )
        .unwrap();

        assert_eq!(item.rating, "4.8");
        assert_eq!(item.platform, "Coursera");
        assert_eq!(item.level, "");
    }

    #[test]
    fn test_item_rejects_nested_object_field() {
        let result: Result<RecommendationItem, _> = serde_json::from_str(r#"{"title": {"text": "ML"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_week_defaults() {
        let week: ScheduleWeek = serde_json::from_str(r#"{"week": 3, "items": ["a", "b"]}"#).unwrap();

        assert_eq!(week, ScheduleWeek::new(3, ["a", "b"]));
        assert!(!week.completed);
        assert_eq!(week.progress, 0);
    }

    #[test]
    fn test_week_accepts_string_number() {
        let week: ScheduleWeek = serde_json::from_str(r#"{"week": " 4 ", "items": []}"#).unwrap();
        assert_eq!(week.week, 4);
    }

    #[test]
    fn test_week_rejects_negative() {
        let result: Result<ScheduleWeek, _> = serde_json::from_str(r#"{"week": -1, "items": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_expiry_boundary() {
        let created = Utc::now();
        let record = UserRecord {
            user_id: "abc123abc123".to_string(),
            recommendations: vec![],
            schedule: vec![],
            created_at: created,
            last_updated: created,
        };
        let ttl = Duration::days(30);

        assert!(!record.is_expired_at(created + Duration::days(29), ttl));
        assert!(record.is_expired_at(created + Duration::days(30), ttl));
        assert!(record.is_expired_at(created + Duration::days(45), ttl));
    }
}
