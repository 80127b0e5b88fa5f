/// Core types and enums used throughout the domain layer
///
/// This module defines the day status model, habit polarity, and the ID
/// newtypes used by Habit and the store/auth boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// Wrapper around UUID for type safety so a habit ID cannot be confused
/// with a user ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The state recorded for one habit on one calendar day
///
/// Absent map entries are equivalent to `Empty`; consumers go through
/// `StatusMap::status_of` so the two are never distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// No entry recorded for the day
    #[default]
    Empty,
    /// The day counts toward streaks
    Success,
    /// The day breaks streaks
    Fail,
}

impl DayStatus {
    /// Advance to the next status in the fixed click cycle
    ///
    /// Empty -> Success -> Fail -> Empty. Total and periodic with period 3.
    pub fn next(self) -> Self {
        match self {
            DayStatus::Empty => DayStatus::Success,
            DayStatus::Success => DayStatus::Fail,
            DayStatus::Fail => DayStatus::Empty,
        }
    }
}

/// Polarity of a habit: building an action up or cutting it out
///
/// Only affects display labels. The analytics never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Something to do regularly (success = did it)
    Good,
    /// Something to abstain from (success = avoided it)
    Bad,
}

impl HabitKind {
    /// Label shown for a `Success` day
    pub fn success_label(&self) -> &'static str {
        match self {
            HabitKind::Good => "Did it",
            HabitKind::Bad => "Avoided",
        }
    }

    /// Label shown for a `Fail` day
    pub fn fail_label(&self) -> &'static str {
        match self {
            HabitKind::Good => "Missed",
            HabitKind::Bad => "Gave in",
        }
    }
}
