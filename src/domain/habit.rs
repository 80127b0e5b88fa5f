/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents one tracked habit:
/// its identity, display name, polarity, and the per-day status map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId, HabitKind, StatusMap};

/// A habit the user tracks day by day
///
/// The store owns the persisted document; in-process a Habit is an
/// immutable snapshot. Analytics and grids only read the status map, and
/// write operations return the next value for the store to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g. "Morning run", "No sugar")
    pub name: String,
    /// Whether success means doing the thing or avoiding it
    pub kind: HabitKind,
    /// Per-day statuses, sparse
    pub statuses: StatusMap,
    /// When this habit was created; used only for collection ordering
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    pub fn new(name: String, kind: HabitKind) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            kind,
            statuses: StatusMap::new(),
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used when loading from the store)
    pub fn from_existing(
        id: HabitId,
        name: String,
        kind: HabitKind,
        statuses: StatusMap,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            statuses,
            created_at,
        }
    }

    /// Validate a habit name according to business rules
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }
}
