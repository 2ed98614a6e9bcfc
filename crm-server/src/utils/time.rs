//! Temporal window calculations
//!
//! All window logic operates on an explicit reference date; nothing in this
//! module reads the wall clock. Date strings that fail to parse are treated
//! as "outside every window" by the callers.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Parse a `YYYY-MM-DD` date string, `None` on any malformed input
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Monday of the ISO week containing `date`.
///
/// Sunday maps to the Monday six days earlier, not the next day.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    let back = match date.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    };
    date - Duration::days(back)
}

/// Inclusive Monday..Sunday range of the ISO week containing `date`
pub fn iso_week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = iso_week_start(date);
    (start, start + Duration::days(6))
}

/// Inclusive rolling window of `days` days ending at `end`
pub fn rolling_window(end: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(days - 1), end)
}

/// `(year, month)` key used by month-equality filters
pub fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Direction of a period-over-period movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

/// Rounded percentage change between two counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowDelta {
    pub percent: i64,
    pub trend: Trend,
}

/// Percentage change of `curr` vs `prev`, rounded to the nearest integer.
///
/// When `prev` is zero the result jumps to 100 if anything happened at all,
/// 0 otherwise. Downstream displays rely on that jump, so it stays.
pub fn window_delta(curr: u64, prev: u64) -> WindowDelta {
    let percent = if prev > 0 {
        let ratio = (curr as f64 - prev as f64) / prev as f64 * 100.0;
        ratio.round() as i64
    } else if curr > 0 {
        100
    } else {
        0
    };

    let trend = match percent.cmp(&0) {
        std::cmp::Ordering::Greater => Trend::Positive,
        std::cmp::Ordering::Less => Trend::Negative,
        std::cmp::Ordering::Equal => Trend::Neutral,
    };

    WindowDelta { percent, trend }
}
