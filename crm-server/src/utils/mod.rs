//! Utility functions

pub mod logger;
pub mod time;

pub use time::{
    Trend, WindowDelta, iso_week_range, iso_week_start, month_key, parse_date, rolling_window,
    window_delta,
};
