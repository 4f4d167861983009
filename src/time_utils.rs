// SPDX-License-Identifier: MIT

//! Shared helpers for dates and wall-clock times.
//!
//! Sessions store their calendar day as `YYYY-MM-DD` and their time range
//! as `HH:MM` wall-clock strings; all server arithmetic is done in UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a calendar day as `YYYY-MM-DD` (session/check-in document key form).
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` calendar day string.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse an `HH:MM` wall-clock string.
pub fn parse_wall_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Combine a day string and an `HH:MM` string into a UTC instant.
pub fn day_and_time_utc(day: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = parse_day(day)?;
    let time = parse_wall_clock(time)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}
