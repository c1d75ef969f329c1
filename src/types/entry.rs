//! Journal records: users and dream entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type EntryId = u64;

/// A journal owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Opaque credential, produced and checked outside this crate
    pub password_hash: String,
}

/// A recorded dream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub text: String,
    /// Combined mood score in [-1, 1]; None for entries never analyzed
    pub mood_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// The view of an entry the insight pipeline reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub text: String,
    pub mood_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl From<&DreamEntry> for EntryRecord {
    fn from(entry: &DreamEntry) -> Self {
        Self {
            text: entry.text.clone(),
            mood_score: entry.mood_score,
            timestamp: entry.timestamp,
        }
    }
}
