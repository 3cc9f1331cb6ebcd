use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const UNKNOWN_DAY: &str = "Unknown";

/// Full English weekday name for a forecast date.
///
/// Only the calendar date is looked at; no timezone conversion happens, so
/// `"2024-03-04"` is a Monday on every machine.
pub fn day_name(date: Option<&str>) -> String {
    date.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_date)
        .map(|d| d.format("%A").to_string())
        .unwrap_or_else(|| UNKNOWN_DAY.to_string())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok().map(|dt| dt.date()))
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
