//! Timestamp parsing for report rows.
//!
//! Laboratory exports carry dates in several layouts depending on the
//! source system. Accepted date parts are `YYYY-MM-DD`, `YYYY/MM/DD`,
//! `YYYY.MM.DD` and `YYYYMMDD`, optionally followed by a space or `T` and a
//! time of `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a report timestamp. Returns `None` for empty or invalid values.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (date_part, time_part) = match trimmed.find([' ', 'T']) {
        Some(pos) => (&trimmed[..pos], Some(trimmed[pos + 1..].trim())),
        None => (trimmed, None),
    };
    let date = parse_date_part(date_part)?;
    let time = match time_part {
        None | Some("") => NaiveTime::MIN,
        Some(time) => parse_time_part(time)?,
    };
    Some(date.and_time(time))
}

fn parse_date_part(value: &str) -> Option<NaiveDate> {
    if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(value, "%Y%m%d").ok();
    }
    let separator = value.chars().find(|c| matches!(c, '-' | '/' | '.'))?;
    let mut parts = value.split(separator);
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if year.len() != 4 || month.is_empty() || day.is_empty() || month.len() > 2 || day.len() > 2
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_time_part(value: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
