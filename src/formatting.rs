//! Display formatting for dates, times, read-time estimates and excerpts
//!
//! API dates arrive as plain dates (`2025-03-14`), naive timestamps or
//! RFC 3339 strings. All of them are interpreted in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::utils::{safe_truncate_chars, strip_tags};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse any date shape the API produces
#[must_use]
pub fn parse_api_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// `"2025-01-05"` → `"January 5, 2025"`
#[must_use]
pub fn format_long_date(raw: &str) -> Option<String> {
    parse_api_datetime(raw).map(|date| date.format("%B %-d, %Y").to_string())
}

/// Day of month and short month name for date badges: `(5, "Jan")`
#[must_use]
pub fn format_day_month(raw: &str) -> Option<(u32, String)> {
    parse_api_datetime(raw).map(|date| (date.day(), date.format("%b").to_string()))
}

/// `"14:30"` or `"14:30:00"` → `"2:30 PM"`
#[must_use]
pub fn format_time_12h(raw: &str) -> Option<String> {
    let mut parts = raw.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes = parts.next()?;

    let minutes_valid = minutes.len() == 2
        && minutes.chars().all(|c| c.is_ascii_digit())
        && minutes.parse::<u32>().is_ok_and(|m| m < 60);
    if hours > 23 || !minutes_valid {
        return None;
    }

    let suffix = if hours >= 12 { "PM" } else { "AM" };
    let display_hour = match hours % 12 {
        0 => 12,
        hour => hour,
    };
    Some(format!("{display_hour}:{minutes} {suffix}"))
}

/// Estimated minutes to read an HTML body
///
/// Tags are stripped before counting words. Empty content reads in zero
/// minutes; anything else takes at least one.
#[must_use]
pub fn read_time_minutes(content: &str, words_per_minute: usize) -> usize {
    let words = strip_tags(content).split_whitespace().count();
    words.div_ceil(words_per_minute.max(1))
}

#[must_use]
pub fn read_time_label(minutes: usize) -> String {
    format!("{minutes} min read")
}

/// Plain-text excerpt of at most `max_chars` characters plus `...`
#[must_use]
pub fn truncate_plain_text(content: &str, max_chars: usize) -> String {
    let plain = strip_tags(content);
    let plain = plain.trim();
    if plain.chars().count() > max_chars {
        format!("{}...", safe_truncate_chars(plain, max_chars))
    } else {
        plain.to_string()
    }
}
