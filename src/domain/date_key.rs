/// Canonical date keys for indexing day statuses
///
/// Every recorded day is addressed by a `YYYY-MM-DD` string. The fixed-width,
/// zero-padded format means keys sort lexicographically in calendar order,
/// which the analytics and grid code rely on throughout.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A calendar day encoded as a `YYYY-MM-DD` string
///
/// Keys are always produced by this codec (or loaded from documents that
/// were), so the string is well-formed by construction. Lexicographic
/// ordering of keys equals chronological ordering of the days they encode.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Encode a calendar date as a key
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    /// Build a key from year/month/day components (month and day are 1-based)
    ///
    /// Returns `None` for triples that do not name a real calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    /// Decode the key back into a calendar date
    ///
    /// Keys originate from the codec, so failure here indicates a corrupted
    /// document rather than a user-facing error path.
    pub fn to_date(&self) -> Result<NaiveDate, DomainError> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d")
            .map_err(|e| DomainError::InvalidDate(format!("malformed date key '{}': {}", self.0, e)))
    }

    /// The underlying string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix shared by all keys in a given month, e.g. `2024-03-`
    ///
    /// Aggregate counts match on this prefix instead of re-parsing dates,
    /// which is correct because the key format is fixed-width and padded.
    pub fn month_prefix(year: i32, month: u32) -> String {
        format!("{:04}-{:02}-", year, month)
    }

    /// Prefix shared by all keys in a given year, e.g. `2024-`
    pub fn year_prefix(year: i32) -> String {
        format!("{:04}-", year)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current calendar day at local midnight
///
/// This is the single reference point for "now". Callers fetch it once per
/// evaluation pass and thread it through the pure functions, keeping
/// same-day comparisons stable within a pass and the functions testable.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
