/// Calendar grid builders for rendering habit history
///
/// The month grid is a fixed 6x7 layout for one calendar month; the year
/// grid is a week-column heatmap spanning a full year. Both are pure
/// builders over a status map and an explicit `today`, and neither performs
/// writes.

pub mod month;
pub mod year;

pub use month::{year_options, DayCell, MonthCursor, MonthGrid, EARLIEST_YEAR, MONTH_GRID_CELLS};
pub use year::{HeatCell, MonthAnchor, WeekColumn, YearGrid};

/// Abbreviated month names, indexed by month number minus one
pub const MONTH_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekday column headers, Sunday first
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
