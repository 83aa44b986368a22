//! Display-time date normalization.
//!
//! Applies only to how cells are rendered, never to stored data. A column is
//! date-like when its lower-cased name contains `date` or `timestamp`; a
//! date-like text cell is reformatted to a fixed 24-hour layout, and a value
//! that fails to parse renders as the empty string — deliberately "fail soft
//! to blank" for this field only, never the raw unparsed text.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Fixed 24-hour display layout: `MM/DD/YYYY HH:MM:SS`.
const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Naive (zone-less) layouts accepted on input.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// True when `column` should receive date normalization.
pub fn is_date_like(column: &str) -> bool {
    let lower = column.to_lowercase();
    lower.contains("date") || lower.contains("timestamp")
}

/// Normalize `value` for display in the local time zone.
pub fn normalize_date(value: &str) -> String {
    normalize_date_in(value, &Local)
}

/// Normalize `value` for display in an explicit zone.
///
/// Zoned values (RFC 3339) are converted into `tz`; naive values are
/// interpreted as already being in `tz`, matching the original viewer's
/// behavior. Unparseable input yields the empty string.
pub fn normalize_date_in<Tz>(value: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = value.trim();

    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return zoned.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return midnight.format(DISPLAY_FORMAT).to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn date_like_detection_by_name_substring() {
        assert!(is_date_like("timestamp"));
        assert!(is_date_like("createdDate"));
        assert!(is_date_like("TRANSACTION_DATE"));
        assert!(is_date_like("event_timestamp_utc"));
        assert!(!is_date_like("payload"));
        assert!(!is_date_like("scanreference"));
    }

    #[test]
    fn rfc3339_renders_in_fixed_24_hour_layout() {
        assert_eq!(
            normalize_date_in("2024-01-05T10:00:00Z", &Utc),
            "01/05/2024 10:00:00"
        );
    }

    #[test]
    fn rfc3339_offset_is_converted_into_target_zone() {
        assert_eq!(
            normalize_date_in("2024-01-05T10:00:00+02:00", &Utc),
            "01/05/2024 08:00:00"
        );
    }

    #[test]
    fn afternoon_times_stay_24_hour() {
        assert_eq!(
            normalize_date_in("2024-06-30T23:59:59Z", &Utc),
            "06/30/2024 23:59:59"
        );
    }

    #[test]
    fn naive_datetime_is_rendered_as_is() {
        assert_eq!(
            normalize_date_in("2024-01-05 10:00:00", &Utc),
            "01/05/2024 10:00:00"
        );
        assert_eq!(
            normalize_date_in("2024-01-05T10:00:00", &Utc),
            "01/05/2024 10:00:00"
        );
    }

    #[test]
    fn bare_date_renders_at_midnight() {
        assert_eq!(
            normalize_date_in("2024-01-05", &Utc),
            "01/05/2024 00:00:00"
        );
    }

    #[test]
    fn unparseable_value_renders_blank() {
        assert_eq!(normalize_date_in("not-a-date", &Utc), "");
        assert_eq!(normalize_date_in("", &Utc), "");
        assert_eq!(normalize_date_in("2024-13-45T99:99:99Z", &Utc), "");
    }
}
