//! Timestamp parsing and month arithmetic

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts tried after RFC 3339, interpreted as UTC
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Date-only layouts. `%y.%d.%m` is the legacy trending_date layout (e.g. "17.14.11")
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%y.%d.%m"];

/// Parse a timestamp cell, returning `None` for empty or unrecognized values
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// First day of the month containing `ts`
pub(crate) fn floor_to_month(ts: &DateTime<Utc>) -> NaiveDate {
    // Day 1 exists in every month
    NaiveDate::from_ymd_opt(ts.year(), ts.month(), 1).unwrap_or(ts.date_naive())
}

/// First day of the following month
pub(crate) fn next_month(month: NaiveDate) -> Option<NaiveDate> {
    month.checked_add_months(Months::new(1))
}

/// Parse a `YYYY-MM` month label into its first day
pub(crate) fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Format a month as `YYYY-MM`
pub(crate) fn month_label(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Whole days from `from` to `to`, rounded toward negative infinity
pub(crate) fn whole_days_between(from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
    const MILLIS_PER_DAY: i64 = 86_400_000;
    (*to - *from).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}
