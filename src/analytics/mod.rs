/// Analytics over a habit's per-day status map
///
/// Streaks and period aggregates are pure functions of a status map and an
/// explicit `today` reference. Nothing here caches or mutates; every call
/// re-derives its result from the snapshot it is given. Callers obtain
/// `today` once per pass (see `domain::date_key::today`) so all computations
/// in that pass agree on what the current day is.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DateKey, DayStatus, StatusMap};

/// Success and failure counts for one month or year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    pub successes: u32,
    pub fails: u32,
}

/// Consecutive `Success` days ending at today, walking backward
///
/// Today itself counts only if marked `Success`; the first day that is
/// `Fail` or unrecorded stops the walk. Future days are never examined.
pub fn current_streak(statuses: &StatusMap, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;

    while statuses.status_of(&DateKey::from_date(cursor)) == DayStatus::Success {
        streak += 1;
        cursor = match cursor.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }

    streak
}

/// Longest run of consecutive `Success` days across recorded history
///
/// Scans day by day from the earliest recorded key through today
/// inclusive. A `Fail` or unrecorded day resets the running count. The scan
/// bound is today, not the latest key, so future-dated entries can never
/// contribute.
pub fn longest_streak(statuses: &StatusMap, today: NaiveDate) -> u32 {
    let Some(first_key) = statuses.earliest_key() else {
        return 0;
    };
    let Ok(start) = first_key.to_date() else {
        // A key that does not decode cannot anchor a scan; treat the
        // document as having no usable history.
        return 0;
    };

    let mut longest = 0;
    let mut run = 0;
    let mut cursor = start;

    while cursor <= today {
        if statuses.status_of(&DateKey::from_date(cursor)) == DayStatus::Success {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    longest
}

/// Successes and fails recorded within a year-month (month is 1-based)
///
/// Counts by prefix match on the canonical key string; explicitly stored
/// `Empty` entries count toward neither total.
pub fn month_stats(statuses: &StatusMap, year: i32, month: u32) -> PeriodStats {
    count_with_prefix(statuses, &DateKey::month_prefix(year, month))
}

/// Successes and fails recorded within a year
pub fn year_stats(statuses: &StatusMap, year: i32) -> PeriodStats {
    count_with_prefix(statuses, &DateKey::year_prefix(year))
}

fn count_with_prefix(statuses: &StatusMap, prefix: &str) -> PeriodStats {
    let mut stats = PeriodStats::default();

    for (key, status) in statuses.iter() {
        if !key.as_str().starts_with(prefix) {
            continue;
        }
        match status {
            DayStatus::Success => stats.successes += 1,
            DayStatus::Fail => stats.fails += 1,
            DayStatus::Empty => {}
        }
    }

    stats
}
