/// Behavior of the pure core through the public API: the date codec, the
/// status cycle, streak analytics, and both grid builders.
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use habitgrid::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn date_key_roundtrip_and_ordering() {
    let mut previous: Option<DateKey> = None;
    let mut cursor = date(2023, 12, 25);
    let end = date(2024, 3, 5);

    while cursor <= end {
        let key = DateKey::from_date(cursor);
        assert_eq!(key.to_date().unwrap(), cursor);
        if let Some(prev) = &previous {
            assert!(prev < &key);
        }
        previous = Some(key);
        cursor = cursor.succ_opt().unwrap();
    }
}

#[test]
fn status_cycle_round_trips_a_day() {
    let key = DateKey::from_ymd(2024, 3, 10).unwrap();
    let mut statuses = StatusMap::new();

    for _ in 0..3 {
        let next = statuses.status_of(&key).next();
        statuses.set(key.clone(), next);
    }

    assert_eq!(statuses.status_of(&key), DayStatus::Empty);
    assert!(statuses.is_empty());
}

#[test]
fn streaks_against_a_fixed_today() {
    let today = date(2024, 5, 20);
    let statuses: StatusMap = (0..4)
        .map(|offset| {
            (
                DateKey::from_date(today - Duration::days(offset)),
                DayStatus::Success,
            )
        })
        .chain(std::iter::once((
            DateKey::from_date(today - Duration::days(4)),
            DayStatus::Fail,
        )))
        .collect();

    assert_eq!(current_streak(&statuses, today), 4);
    assert_eq!(longest_streak(&statuses, today), 4);

    let month = month_stats(&statuses, 2024, 5);
    assert_eq!(month.successes, 4);
    assert_eq!(month.fails, 1);
    assert_eq!(year_stats(&statuses, 2024).successes, 4);
    assert_eq!(year_stats(&statuses, 2023).successes, 0);
}

#[test]
fn month_grids_always_have_42_cells() {
    let today = date(2026, 12, 31);
    for year in [2023, 2024, 2025] {
        for month in 1..=12 {
            let grid = MonthGrid::build(year, month, &StatusMap::new(), today).unwrap();
            assert_eq!(grid.cells.len(), MONTH_GRID_CELLS, "{}-{}", year, month);

            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let lead = first.weekday().num_days_from_sunday() as usize;
            assert!(grid.cells[..lead].iter().all(Option::is_none));
            assert!(grid.cells[lead].is_some());
        }
    }
}

#[test]
fn year_grids_cover_each_year_exactly() {
    let today = date(2026, 12, 31);
    for year in 2000..=2026 {
        let grid = YearGrid::build(year, &StatusMap::new(), today).unwrap();

        assert!(
            grid.weeks.len() == 52 || grid.weeks.len() == 53,
            "{} has {} columns",
            year,
            grid.weeks.len()
        );

        let jan1 = date(year, 1, 1);
        let days_in_year = if jan1.leap_year() { 366 } else { 365 };
        let cells: Vec<&HeatCell> = grid.weeks.iter().flat_map(|w| w.0.iter().flatten()).collect();
        assert_eq!(cells.len(), days_in_year);

        // The first column opens on the Sunday on or before January 1.
        let pad = jan1.weekday().num_days_from_sunday() as usize;
        assert!(grid.weeks[0].0[..pad].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0].0[pad].as_ref().unwrap().day, 1);

        // The last column closes on the Saturday on or after December 31.
        let dec31 = date(year, 12, 31);
        let tail = dec31.weekday().num_days_from_sunday() as usize;
        let last = grid.weeks.last().unwrap();
        assert_eq!(last.0[tail].as_ref().unwrap().day, 31);
        assert!(last.0[tail + 1..].iter().all(Option::is_none));

        assert_eq!(grid.month_anchors.len(), 12);
    }
}

#[test]
fn month_navigation_never_reaches_the_future() {
    let today = date(2024, 3, 15);
    let mut cursor = MonthCursor { year: 2023, month: 11 };

    let mut steps = 0;
    while let Some(next) = cursor.next(today) {
        cursor = next;
        steps += 1;
        assert!(steps <= 12, "navigation ran past the current month");
    }

    assert!(cursor.is_current(today));
    assert_eq!(steps, 4);
}

#[test]
fn weekday_constants_align_with_grid_columns() {
    // Column 0 of both grids is Sunday.
    assert_eq!(WEEKDAYS[0], "Sun");
    assert_eq!(MONTH_SHORT.len(), 12);
    assert_eq!(date(2024, 3, 3).weekday(), Weekday::Sun);

    let grid = MonthGrid::build(2024, 3, &StatusMap::new(), date(2024, 3, 15)).unwrap();
    // 2024-03-03 is a Sunday and must sit at the start of a row.
    let index = grid
        .cells
        .iter()
        .position(|c| c.as_ref().is_some_and(|c| c.day == 3))
        .unwrap();
    assert_eq!(index % 7, 0);
}
