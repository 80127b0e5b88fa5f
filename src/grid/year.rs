/// Year heatmap grid
///
/// Lays a full year out as consecutive Sunday-to-Saturday week columns, the
/// contributions-graph arrangement. Boundary slots belonging to the
/// neighboring years are `None` placeholders; no status is ever resolved
/// for them. Display only: this builder never produces writes.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{DateKey, DayStatus, DomainError, StatusMap};

/// One in-year day of the heatmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatCell {
    /// Canonical key for this day
    pub key: DateKey,
    /// Month number, 1-based
    pub month: u32,
    /// Day of month, 1-based
    pub day: u32,
    /// Status resolved from the map (absent reads as `Empty`)
    pub status: DayStatus,
    /// Strictly after today
    pub is_future: bool,
    /// Equal to today
    pub is_today: bool,
}

/// Seven Sunday-to-Saturday slots; `None` marks days outside the year
#[derive(Debug, Clone, PartialEq)]
pub struct WeekColumn(pub [Option<HeatCell>; 7]);

/// First week column containing a day of the given month
///
/// Month labels above the grid anchor to these column indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthAnchor {
    /// Month number, 1-based
    pub month: u32,
    /// Index into the week-column sequence
    pub col: usize,
}

/// A full year of week columns plus month label positions
#[derive(Debug, Clone, PartialEq)]
pub struct YearGrid {
    pub year: i32,
    /// 52 or 53 consecutive week columns
    pub weeks: Vec<WeekColumn>,
    /// One anchor per month, in month order
    pub month_anchors: Vec<MonthAnchor>,
}

impl YearGrid {
    /// Build the heatmap grid for a year against a status snapshot
    ///
    /// The grid spans the Sunday on or before January 1 through the
    /// Saturday on or after December 31, so every in-year day lands in
    /// exactly one slot. Month anchors are collected in the same pass.
    pub fn build(year: i32, statuses: &StatusMap, today: NaiveDate) -> Result<Self, DomainError> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DomainError::InvalidDate(format!("no such year: {}", year)))?;
        let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| DomainError::InvalidDate(format!("no such year: {}", year)))?;

        let start = jan1 - Duration::days(i64::from(jan1.weekday().num_days_from_sunday()));
        let end = dec31 + Duration::days(i64::from(6 - dec31.weekday().num_days_from_sunday()));

        let mut weeks = Vec::new();
        let mut month_anchors = Vec::new();
        let mut seen_months = [false; 12];

        let mut cursor = start;
        while cursor <= end {
            let col = weeks.len();
            let mut week = WeekColumn([None, None, None, None, None, None, None]);

            for slot in week.0.iter_mut() {
                if cursor.year() == year {
                    let month = cursor.month();
                    if !seen_months[(month - 1) as usize] {
                        seen_months[(month - 1) as usize] = true;
                        month_anchors.push(MonthAnchor { month, col });
                    }
                    let key = DateKey::from_date(cursor);
                    *slot = Some(HeatCell {
                        status: statuses.status_of(&key),
                        key,
                        month,
                        day: cursor.day(),
                        is_future: cursor > today,
                        is_today: cursor == today,
                    });
                }
                cursor = cursor.succ_opt().ok_or_else(|| {
                    DomainError::InvalidDate("date overflow while building year grid".to_string())
                })?;
            }

            weeks.push(week);
        }

        Ok(Self {
            year,
            weeks,
            month_anchors,
        })
    }
}
