//! PlanStore - cached learning plans keyed by identity hash
//!
//! Holds the persisted data model, the identity hasher that turns a user's
//! free-text profile into a cache key, and a file-per-user JSON store with a
//! time-to-live.
//!
//! # Layout
//!
//! ```text
//! user_data/
//! ├── 3f2a9c01b7de.json
//! └── 8c41e0d2aa19.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use planstore::{PlanStore, identity};
//!
//! let store = PlanStore::open("user_data")?;
//! let id = identity::user_id("Ada", "CS undergrad", "become a data scientist");
//! if let Some(record) = store.get(&id) {
//!     println!("{} weeks cached", record.schedule.len());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod identity;
pub mod record;
mod store;

pub use record::{RecommendationItem, ScheduleWeek, UserRecord};
pub use store::{PlanStore, RecordSummary, StoreError};

/// Records older than this many days are treated as absent
pub const DEFAULT_TTL_DAYS: i64 = 30;
