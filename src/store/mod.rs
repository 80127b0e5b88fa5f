/// Document store boundary for persisted habits
///
/// Habits live in an external per-user collection that is consumed through
/// a live subscription: every change delivers the full ordered habit list,
/// never a diff, so readers stay stateless. This module defines the store
/// trait and errors; `sqlite` provides the local reference implementation.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::SqliteHabitStore;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::{DateKey, DayStatus, Habit, HabitId, HabitKind, UserId};

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Partial update to a habit's mutable fields
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub kind: Option<HabitKind>,
}

impl HabitPatch {
    /// Patch that only renames the habit
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the polarity
    pub fn set_kind(kind: HabitKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Trait defining the store interface for habit documents
///
/// Implementations must deliver full snapshot replacements through the
/// subscription channel after every write, including the initial load, and
/// must keep documents sparse: writing `Empty` for a day removes the key
/// rather than storing it.
#[async_trait]
pub trait HabitStore: Send + Sync {
    /// Subscribe to a user's habit list
    ///
    /// The receiver starts at the current list and observes a complete,
    /// creation-ordered replacement after each write.
    async fn subscribe(&self, user: &UserId) -> Result<watch::Receiver<Vec<Habit>>, StoreError>;

    /// Create a habit with an empty status map, returning its new id
    async fn create(
        &self,
        user: &UserId,
        name: &str,
        kind: HabitKind,
    ) -> Result<HabitId, StoreError>;

    /// Apply a partial update to name and/or kind
    async fn update(
        &self,
        user: &UserId,
        habit: &HabitId,
        patch: HabitPatch,
    ) -> Result<(), StoreError>;

    /// Delete a habit document
    async fn delete(&self, user: &UserId, habit: &HabitId) -> Result<(), StoreError>;

    /// Write one day's status; `Empty` removes the key entirely
    async fn set_day_status(
        &self,
        user: &UserId,
        habit: &HabitId,
        key: &DateKey,
        status: DayStatus,
    ) -> Result<(), StoreError>;

    /// Reset a habit's status map to empty
    async fn clear_statuses(&self, user: &UserId, habit: &HabitId) -> Result<(), StoreError>;
}
