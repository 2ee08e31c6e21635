use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

use crate::models::ViewGranularity;

/// Derive the deterministic cache key naming the calendar window that
/// contains `date` at the given granularity: `YYYY-MM-DD` for a day,
/// `YYYY-Www` for an ISO week (Monday start), `YYYY-MM` for a month.
pub fn view_key(date: NaiveDate, granularity: &ViewGranularity) -> String {
    match granularity {
        ViewGranularity::Day => date.format("%Y-%m-%d").to_string(),
        ViewGranularity::Week => {
            // The ISO week-based year, not the calendar year: early
            // January days can belong to the previous year's last week.
            let iso = date.iso_week();
            format!("{}-W{:02}", iso.year(), iso.week())
        }
        ViewGranularity::Month => date.format("%Y-%m").to_string(),
    }
}

/// Half-open UTC fetch window `[start, end)` for the calendar view
/// containing `date`: the day itself, its Monday-start ISO week, or its
/// calendar month.
pub fn window_bounds(
    date: NaiveDate,
    granularity: &ViewGranularity,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let (first, next) = match granularity {
        ViewGranularity::Day => (date, date + Duration::days(1)),
        ViewGranularity::Week => {
            let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
            (monday, monday + Duration::days(7))
        }
        ViewGranularity::Month => {
            let first = date.with_day(1).unwrap();
            let next = first.checked_add_months(Months::new(1)).unwrap();
            (first, next)
        }
    };
    (start_of_day(first), start_of_day(next))
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}
