//! Text and timestamp formatting shared by the CLI table and the TUI

use chrono::{DateTime, TimeZone};

use crate::models::parse_timestamp;

/// Placeholder for values that cannot be shown
pub const MISSING: &str = "-";

/// Layout constants used across CLI and TUI
pub mod layout {
    pub const NAME_WIDTH: usize = 28;
    pub const DOMAIN_WIDTH: usize = 40;
}

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// Unicode-safe: counts characters, not bytes.
///
/// # Examples
/// ```
/// use cdnmon::formatting::truncate_string;
/// assert_eq!(truncate_string("assets.example.com", 30), "assets.example.com");
/// assert_eq!(truncate_string("assets.example.com", 9), "assets...");
/// assert_eq!(truncate_string("ab", 2), "ab");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// `Oct 3, 2026`
#[must_use]
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%b %-d, %Y").to_string()
}

/// `3:05 PM`
#[must_use]
pub fn format_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%-I:%M %p").to_string()
}

/// Date and time columns for a raw timestamp, in local time.
///
/// Unparseable input yields the placeholder in both columns.
#[must_use]
pub fn date_and_time(raw: &str) -> (String, String) {
    match parse_timestamp(raw) {
        Some(dt) => (format_date(&dt), format_time(&dt)),
        None => (MISSING.to_string(), MISSING.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_truncate_string_unicode() {
        assert_eq!(truncate_string("édge-cdn", 5), "éd...");
        assert_eq!(truncate_string("abcdef", 3), "abc");
    }

    #[test]
    fn test_date_and_time_formats() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 3, 15, 5, 0).unwrap();
        assert_eq!(format_date(&dt), "Oct 3, 2026");
        assert_eq!(format_time(&dt), "3:05 PM");

        let midnight = Utc.with_ymd_and_hms(2026, 1, 20, 0, 30, 0).unwrap();
        assert_eq!(format_time(&midnight), "12:30 AM");
    }

    #[test]
    fn test_unparseable_timestamp() {
        assert_eq!(
            date_and_time("yesterday"),
            (MISSING.to_string(), MISSING.to_string())
        );
        let (date, time) = date_and_time("2026-10-03T15:05:00Z");
        assert_ne!(date, MISSING);
        assert_ne!(time, MISSING);
    }
}
