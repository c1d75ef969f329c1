//! Entry store: users and dream entries
//!
//! `EntryStore` is the read/write surface the insight pipeline needs.
//! `MemoryStore` keeps everything in memory behind a lock and can be
//! snapshotted to a JSON file.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::{DreamEntry, EntryId, EntryRecord, User, UserId};

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("dream entry {0} not found")]
    EntryNotFound(EntryId),
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),
    #[error("mood score {0} is outside [-1, 1]")]
    ScoreOutOfRange(f64),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("journal file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("journal file is not valid JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persistence collaborator used by the insight pipeline
pub trait EntryStore: Send + Sync {
    /// A user's entries, oldest first, optionally only those at or after `since`
    fn fetch_entries(
        &self,
        user_id: UserId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<EntryRecord>, StoreError>;

    /// Persist the mood score computed at write time
    fn store_mood_score(&self, entry_id: EntryId, score: f64) -> Result<(), StoreError>;

    /// Create an unscored entry stamped now
    fn insert_entry(&self, user_id: UserId, text: &str) -> Result<DreamEntry, StoreError>;

    /// Create an entry stamped now together with its mood score, in one step
    fn insert_scored_entry(
        &self,
        user_id: UserId,
        text: &str,
        score: f64,
    ) -> Result<DreamEntry, StoreError>;

    fn user_exists(&self, user_id: UserId) -> Result<bool, StoreError>;
}

/// Mood scores live in [-1, 1]; NaN is rejected too
pub fn check_score(score: f64) -> Result<f64, StoreError> {
    if (-1.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(StoreError::ScoreOutOfRange(score))
    }
}

/// Serializable journal contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalData {
    pub users: Vec<User>,
    pub entries: Vec<DreamEntry>,
    pub next_user_id: UserId,
    pub next_entry_id: EntryId,
}

/// In-memory journal
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<JournalData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: JournalData) -> Self {
        Self { data: RwLock::new(data) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, JournalData>, StoreError> {
        self.data.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, JournalData>, StoreError> {
        self.data.write().map_err(|_| StoreError::Poisoned)
    }

    /// Register a user; usernames are unique
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut data = self.write()?;
        if data.users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        data.next_user_id += 1;
        let user = User {
            id: data.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        data.users.push(user.clone());
        Ok(user)
    }

    pub fn user(&self, user_id: UserId) -> Result<User, StoreError> {
        self.read()?
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound(user_id))
    }

    pub fn user_by_name(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.username == username).cloned())
    }

    /// Remove a user and all of their entries
    pub fn delete_user(&self, user_id: UserId) -> Result<usize, StoreError> {
        let mut data = self.write()?;
        let before = data.users.len();
        data.users.retain(|u| u.id != user_id);
        if data.users.len() == before {
            return Err(StoreError::UserNotFound(user_id));
        }
        let entries_before = data.entries.len();
        data.entries.retain(|e| e.user_id != user_id);
        let removed = entries_before - data.entries.len();
        debug!(user_id, removed, "User deleted");
        Ok(removed)
    }

    /// Insert an unscored entry with an explicit timestamp
    pub fn insert_entry_at(
        &self,
        user_id: UserId,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<DreamEntry, StoreError> {
        self.push_entry(user_id, text, None, timestamp)
    }

    fn push_entry(
        &self,
        user_id: UserId,
        text: &str,
        mood_score: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<DreamEntry, StoreError> {
        let mut data = self.write()?;
        if !data.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        data.next_entry_id += 1;
        let entry = DreamEntry {
            id: data.next_entry_id,
            user_id,
            text: text.to_string(),
            mood_score,
            timestamp,
        };
        data.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn entry(&self, entry_id: EntryId) -> Result<DreamEntry, StoreError> {
        self.read()?
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .cloned()
            .ok_or(StoreError::EntryNotFound(entry_id))
    }

    /// A user's entries, oldest first
    pub fn entries_for(&self, user_id: UserId) -> Result<Vec<DreamEntry>, StoreError> {
        let data = self.read()?;
        if !data.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        let mut entries: Vec<DreamEntry> = data
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Copy of the full journal
    pub fn snapshot(&self) -> Result<JournalData, StoreError> {
        Ok(self.read()?.clone())
    }
}

impl EntryStore for MemoryStore {
    fn fetch_entries(
        &self,
        user_id: UserId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<EntryRecord>, StoreError> {
        Ok(self
            .entries_for(user_id)?
            .iter()
            .filter(|e| since.map_or(true, |s| e.timestamp >= s))
            .map(EntryRecord::from)
            .collect())
    }

    fn store_mood_score(&self, entry_id: EntryId, score: f64) -> Result<(), StoreError> {
        let score = check_score(score)?;
        let mut data = self.write()?;
        let entry = data
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(StoreError::EntryNotFound(entry_id))?;
        entry.mood_score = Some(score);
        Ok(())
    }

    fn insert_entry(&self, user_id: UserId, text: &str) -> Result<DreamEntry, StoreError> {
        self.insert_entry_at(user_id, text, Utc::now())
    }

    fn insert_scored_entry(
        &self,
        user_id: UserId,
        text: &str,
        score: f64,
    ) -> Result<DreamEntry, StoreError> {
        let score = check_score(score)?;
        self.push_entry(user_id, text, Some(score), Utc::now())
    }

    fn user_exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        Ok(self.read()?.users.iter().any(|u| u.id == user_id))
    }
}

/// Save journal to a JSON file
pub fn save_journal(store: &MemoryStore, path: &str) -> Result<(), StoreError> {
    write_journal(&store.snapshot()?, path)
}

/// Write already-snapshotted journal contents to a JSON file
pub fn write_journal(data: &JournalData, path: &str) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;
    Ok(())
}

/// Load journal from a JSON file
pub fn load_journal(path: &str) -> Result<MemoryStore, StoreError> {
    let json = std::fs::read_to_string(path)?;
    let data: JournalData = serde_json::from_str(&json)?;
    Ok(MemoryStore::from_data(data))
}

/// Load the journal if the file exists, else start empty
pub fn open_journal(path: &str) -> Result<MemoryStore, StoreError> {
    if std::path::Path::new(path).exists() {
        load_journal(path)
    } else {
        Ok(MemoryStore::new())
    }
}
