//! Model reply parsing
//!
//! Models rarely follow the requested layout exactly, so every grammar here
//! skips what it cannot read instead of failing. Deciding whether enough
//! survived is the fallback policy's job.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use planstore::{RecommendationItem, ScheduleWeek};

use crate::config::RecommendationSchema;

static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));

/// Parse pipe-delimited recommendation lines
///
/// Lines without `|` or with fewer fields than the schema needs are dropped.
/// Fields past the schema's count are ignored.
pub fn parse_pipe_lines(text: &str, schema: RecommendationSchema) -> Vec<RecommendationItem> {
    let needed = schema.field_count();
    let items: Vec<_> = text
        .lines()
        .filter(|line| line.contains('|'))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() < needed {
                debug!(line, fields = fields.len(), needed, "parse_pipe_lines: short line dropped");
                return None;
            }
            Some(match schema {
                RecommendationSchema::Simple => RecommendationItem::simple(fields[0], fields[1], fields[2]),
                RecommendationSchema::Extended => RecommendationItem {
                    title: fields[0].to_string(),
                    url: fields[1].to_string(),
                    platform: fields[2].to_string(),
                    duration: fields[3].to_string(),
                    level: fields[4].to_string(),
                    rating: fields[5].to_string(),
                    desc: fields[6].to_string(),
                    why: fields[7].to_string(),
                },
            })
        })
        .collect();

    debug!(count = items.len(), "parse_pipe_lines: parsed");
    items
}

/// Parse a single `Week N: task, task` line
///
/// Returns `None` when the line is not a week line or its number is unreadable.
pub fn parse_week_line(line: &str) -> Option<ScheduleWeek> {
    let line = line.trim();
    if !line.starts_with("Week ") {
        return None;
    }

    let (head, tasks) = line.split_once(':')?;
    let week = match head.split_whitespace().nth(1).map(str::parse::<u32>) {
        Some(Ok(week)) => week,
        _ => {
            debug!(line, "parse_week_line: unreadable week number");
            return None;
        }
    };

    let items = tasks.split(',').map(str::trim).filter(|t| !t.is_empty());
    Some(ScheduleWeek::new(week, items))
}

/// Parse every week line in a reply, in reply order
pub fn parse_week_lines(text: &str) -> Vec<ScheduleWeek> {
    let weeks: Vec<_> = text.lines().filter_map(parse_week_line).collect();
    debug!(count = weeks.len(), "parse_week_lines: parsed");
    weeks
}

/// Locate the span from the first `[` to the last `]`
pub fn extract_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

/// Parse the embedded JSON array, keeping the elements that fit `T`
///
/// `None` means there was no array to read at all.
pub fn parse_json_array<T: DeserializeOwned>(text: &str) -> Option<Vec<T>> {
    let span = extract_json_array(text)?;
    let values: Vec<serde_json::Value> = match serde_json::from_str(span) {
        Ok(values) => values,
        Err(e) => {
            debug!(error = %e, "parse_json_array: span is not a JSON array");
            return None;
        }
    };

    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    debug!(total, kept = items.len(), "parse_json_array: parsed");
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pipe_simple() {
        let text = "Here you go:\n\
                    Intro to Python | https://www.learnpython.org/ | Fundamentals\n\
                    Statistics | https://www.khanacademy.org/math | Math base\n\
                    Enjoy!";

        let items = parse_pipe_lines(text, RecommendationSchema::Simple);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Intro to Python");
        assert_eq!(items[0].url, "https://www.learnpython.org/");
        assert_eq!(items[0].why, "Fundamentals");
        assert_eq!(items[1].title, "Statistics");
    }

    #[test]
    fn test_pipe_extended_needs_eight_fields() {
        let text = "ML | https://coursera.org/ml | Coursera | 60 hours | Intermediate | 4.9 | Classic course | Core theory\n\
                    Short | https://x | Udemy";

        let items = parse_pipe_lines(text, RecommendationSchema::Extended);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].platform, "Coursera");
        assert_eq!(items[0].rating, "4.9");
        assert_eq!(items[0].desc, "Classic course");
        assert_eq!(items[0].why, "Core theory");
    }

    #[test]
    fn test_pipe_markdown_table_row() {
        // Leading and trailing pipes produce empty edge fields
        let items = parse_pipe_lines("| A | B | C |", RecommendationSchema::Simple);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].url, "A");
    }

    #[test]
    fn test_pipe_prose_yields_nothing() {
        assert!(parse_pipe_lines("just some prose with no delimiters", RecommendationSchema::Simple).is_empty());
    }

    #[test]
    fn test_week_line() {
        let week = parse_week_line("Week 3: Learn SQL,  build a dashboard , , share it").unwrap();
        assert_eq!(week.week, 3);
        assert_eq!(week.items, vec!["Learn SQL", "build a dashboard", "share it"]);
        assert!(!week.completed);
        assert_eq!(week.progress, 0);
    }

    #[test]
    fn test_week_line_trims_leading_whitespace() {
        assert_eq!(parse_week_line("   Week 2: a").unwrap().week, 2);
    }

    #[test]
    fn test_week_line_rejections() {
        assert!(parse_week_line("week 1: lowercase").is_none());
        assert!(parse_week_line("Week 1 no colon").is_none());
        assert!(parse_week_line("Week one: a, b").is_none());
        assert!(parse_week_line("Week 1-2: a, b").is_none());
        assert!(parse_week_line("**Week 1:** a").is_none());
    }

    #[test]
    fn test_week_line_number_is_second_token() {
        // "Week 4 (review): a" still reads week 4
        assert_eq!(parse_week_line("Week 4 (review): a").unwrap().week, 4);
    }

    #[test]
    fn test_week_lines_skip_bad_numbers() {
        let text = "Week 1: a\nWeek two: b\nWeek 3: c";
        let weeks = parse_week_lines(text);
        let numbers: Vec<_> = weeks.iter().map(|w| w.week).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_extract_json_array_is_greedy() {
        let text = "Sure! [1, 2]\nand also [3]. Done";
        assert_eq!(extract_json_array(text), Some("[1, 2]\nand also [3]"));
        assert_eq!(extract_json_array("no array"), None);
    }

    #[test]
    fn test_parse_json_schedule() {
        let text = r#"Here is the plan:
```json
[
  {"week": 1, "items": ["a", "b"], "completed": false, "progress": 0},
  {"week": "2", "items": ["c"]},
  {"items": ["missing week"]}
]
```"#;
        let weeks: Vec<ScheduleWeek> = parse_json_array(text).unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1], ScheduleWeek::new(2, ["c"]));
    }

    #[test]
    fn test_parse_json_recommendations() {
        let text = r#"[{"title": "ML", "url": "https://x", "platform": "Coursera", "rating": 4.7, "why": "core"}]"#;
        let items: Vec<RecommendationItem> = parse_json_array(text).unwrap();
        assert_eq!(items[0].rating, "4.7");
    }

    #[test]
    fn test_parse_json_invalid_span() {
        assert!(parse_json_array::<ScheduleWeek>("[not json]").is_none());
        assert!(parse_json_array::<ScheduleWeek>("{\"week\": 1}").is_none());
    }

    proptest! {
        #[test]
        fn prop_pipe_takes_first_fields(
            fields in proptest::collection::vec("[A-Za-z0-9 .:/]{0,12}", 3..8)
        ) {
            let line = fields.join("|");
            let items = parse_pipe_lines(&line, RecommendationSchema::Simple);
            prop_assert_eq!(items.len(), 1);
            prop_assert_eq!(&items[0].title, fields[0].trim());
            prop_assert_eq!(&items[0].url, fields[1].trim());
            prop_assert_eq!(&items[0].why, fields[2].trim());
        }

        #[test]
        fn prop_short_pipe_lines_dropped(fields in proptest::collection::vec("[A-Za-z0-9 ]{0,12}", 2..10)) {
            let line = fields.join("|");
            let items = parse_pipe_lines(&line, RecommendationSchema::Extended);
            prop_assert_eq!(items.len(), usize::from(fields.len() >= 8));
        }

        #[test]
        fn prop_week_line_roundtrip(
            week in 1u32..100,
            tasks in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]", 1..5)
        ) {
            let line = format!("Week {}: {}", week, tasks.join(" , "));
            let parsed = parse_week_line(&line).unwrap();
            prop_assert_eq!(parsed.week, week);
            prop_assert_eq!(parsed.items, tasks);
        }
    }
}
