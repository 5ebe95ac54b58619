//! Plan generation
//!
//! `parser` reads model replies, `fallback` decides what survives, `builder`
//! drives the model, and `service` puts the store in front of it all.

mod builder;
pub mod fallback;
pub mod parser;
mod service;

pub use builder::Planner;
pub use fallback::{SCHEDULE_WEEKS, Settled};
pub use service::{MentorService, PlanOutcome, Profile};
