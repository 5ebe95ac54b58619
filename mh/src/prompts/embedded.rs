//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Pipe-delimited recommendation lines
pub const RECOMMENDATIONS: &str = include_str!("../../prompts/recommendations.pmt");

/// Recommendations as a JSON array
pub const RECOMMENDATIONS_JSON: &str = include_str!("../../prompts/recommendations-json.pmt");

/// `Week N:` schedule lines
pub const SCHEDULE: &str = include_str!("../../prompts/schedule.pmt");

/// Schedule as a JSON array
pub const SCHEDULE_JSON: &str = include_str!("../../prompts/schedule-json.pmt");

/// Mentor chatbot context
pub const CHAT: &str = include_str!("../../prompts/chat.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "recommendations" => Some(RECOMMENDATIONS),
        "recommendations-json" => Some(RECOMMENDATIONS_JSON),
        "schedule" => Some(SCHEDULE),
        "schedule-json" => Some(SCHEDULE_JSON),
        "chat" => Some(CHAT),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
