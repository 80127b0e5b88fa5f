/// Sparse per-day status map for a single habit
///
/// Only `Success`/`Fail` days are materially stored; a missing key means the
/// day is `Empty`. All reads go through `status_of` so absence and an
/// explicitly stored `Empty` are indistinguishable everywhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DateKey, DayStatus};

/// Mapping from date key to day status, sorted by calendar order
///
/// Backed by a BTreeMap so the earliest recorded day is simply the first
/// key. Documents loaded from other writers may contain explicit `Empty`
/// entries; those read identically to absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMap(BTreeMap<DateKey, DayStatus>);

impl StatusMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the status recorded for a day, defaulting to `Empty`
    ///
    /// This is the only sanctioned read path; it makes a missing key and a
    /// stored `Empty` value equivalent for every consumer.
    pub fn status_of(&self, key: &DateKey) -> DayStatus {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// Record a status for a day
    ///
    /// Writing `Empty` removes the key entirely, keeping the map sparse.
    pub fn set(&mut self, key: DateKey, status: DayStatus) {
        match status {
            DayStatus::Empty => {
                self.0.remove(&key);
            }
            _ => {
                self.0.insert(key, status);
            }
        }
    }

    /// The chronologically earliest recorded key, if any
    pub fn earliest_key(&self) -> Option<&DateKey> {
        self.0.keys().next()
    }

    /// Iterate over recorded entries in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &DayStatus)> {
        self.0.iter()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries are recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DateKey, DayStatus)> for StatusMap {
    fn from_iter<I: IntoIterator<Item = (DateKey, DayStatus)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, status) in iter {
            map.set(key, status);
        }
        map
    }
}
