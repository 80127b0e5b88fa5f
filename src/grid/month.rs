/// Month calendar grid and navigation
///
/// Builds the fixed 42-cell grid for one month and implements the
/// navigation rules around it: backward is always allowed, forward stops at
/// the current month, and day clicks on future dates are ignored.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{DateKey, DayStatus, DomainError, StatusMap};

/// Cells in a month grid: 6 rows of 7 so the height never varies
pub const MONTH_GRID_CELLS: usize = 42;

/// Earliest year reachable through navigation
pub const EARLIEST_YEAR: i32 = 2000;

/// One day of the displayed month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Canonical key for this day
    pub key: DateKey,
    /// Day of month, 1-based
    pub day: u32,
    /// Status resolved from the map (absent reads as `Empty`)
    pub status: DayStatus,
    /// Strictly after today; future cells are never clickable
    pub is_future: bool,
    /// Equal to today
    pub is_today: bool,
}

/// A 6x7 grid for one calendar month
///
/// The first `weekday-of-day-1` slots are `None` padding, followed by one
/// cell per day of the month, followed by trailing `None` padding up to 42.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    /// Month number, 1-based
    pub month: u32,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    /// Build the grid for a year-month against a status snapshot
    pub fn build(
        year: i32,
        month: u32,
        statuses: &StatusMap,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let first = first_of_month(year, month)?;
        let days = days_in_month(year, month)?;
        let lead = first.weekday().num_days_from_sunday() as usize;

        let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(MONTH_GRID_CELLS);
        cells.resize(lead, None);

        for day in 1..=days {
            let date = first + Duration::days(i64::from(day) - 1);
            let key = DateKey::from_date(date);
            cells.push(Some(DayCell {
                status: statuses.status_of(&key),
                key,
                day,
                is_future: date > today,
                is_today: date == today,
            }));
        }

        cells.resize(MONTH_GRID_CELLS, None);

        Ok(Self { year, month, cells })
    }

    /// Resolve a click on a day of this month
    ///
    /// Returns the day's key and the next status in the cycle for the
    /// caller to persist. Future days (and days outside the month) return
    /// `None` and must cause no write.
    pub fn advance_day(&self, day: u32) -> Option<(DateKey, DayStatus)> {
        let cell = self.cells.iter().flatten().find(|c| c.day == day)?;
        if cell.is_future {
            return None;
        }
        Some((cell.key.clone(), cell.status.next()))
    }
}

/// The year-month a calendar view is showing
///
/// Navigation can move backward freely but can never advance into or past
/// the current calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// Month number, 1-based
    pub month: u32,
}

impl MonthCursor {
    /// Cursor positioned on the current calendar month
    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Whether this cursor is on the current calendar month
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.year == today.year() && self.month == today.month()
    }

    /// Move one month back; always permitted
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Move one month forward, only while strictly before the current month
    pub fn next(self, today: NaiveDate) -> Option<Self> {
        if self.is_current(today) || is_future_year_month(self.year, self.month, today) {
            return None;
        }
        Some(if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        })
    }

    /// Jump to another month within the displayed year
    ///
    /// Future year-months are rejected.
    pub fn select_month(self, month: u32, today: NaiveDate) -> Option<Self> {
        if !(1..=12).contains(&month) || is_future_year_month(self.year, month, today) {
            return None;
        }
        Some(Self {
            year: self.year,
            month,
        })
    }

    /// Jump to another year, keeping the month where possible
    ///
    /// Switching to the current year while a later month is displayed
    /// clamps down to the current month.
    pub fn select_year(self, year: i32, today: NaiveDate) -> Self {
        let month = if year == today.year() && self.month > today.month() {
            today.month()
        } else {
            self.month
        };
        Self { year, month }
    }
}

/// Selectable years, current year first, descending to the earliest
pub fn year_options(today: NaiveDate) -> Vec<i32> {
    (EARLIEST_YEAR..=today.year()).rev().collect()
}

fn is_future_year_month(year: i32, month: u32, today: NaiveDate) -> bool {
    year > today.year() || (year == today.year() && month > today.month())
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::InvalidDate(format!("no such month: {}-{}", year, month)))
}

fn days_in_month(year: i32, month: u32) -> Result<u32, DomainError> {
    let first = first_of_month(year, month)?;
    let next_first = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok(next_first.signed_duration_since(first).num_days() as u32)
}
