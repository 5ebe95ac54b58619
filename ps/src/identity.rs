//! Identity hashing
//!
//! A returning user is recognized purely by what they typed: the same
//! (name, background, goal) triple, compared case-insensitively, always maps to
//! the same id. Nothing ties the id to an account, so different people who
//! enter identical text share one cached record.

use sha2::{Digest, Sha256};

/// Length of a user id in hex characters
pub const USER_ID_LEN: usize = 12;

/// Derive the cache key for a user
pub fn user_id(name: &str, background: &str, goal: &str) -> String {
    let key = format!(
        "{}_{}_{}",
        name.to_lowercase(),
        background.to_lowercase(),
        goal.to_lowercase()
    );
    let mut id = hex::encode(Sha256::digest(key.as_bytes()));
    id.truncate(USER_ID_LEN);
    id
}

/// Whether `id` is safe to use as a file stem in the store
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 64 && id.chars().all(|c| c.is_ascii_hexdigit())
}
