//! Publish date parsing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Parse a frontmatter date.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`,
/// and `YYYY-MM-DD`. Values without an offset are taken as UTC.
pub fn parse_publish_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_as_utc_midnight() {
        let dt = parse_publish_date("2023-01-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_publish_date("2023-02-01T09:30:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn parses_naive_datetimes() {
        assert!(parse_publish_date("2023-02-01T09:30:00").is_some());
        assert!(parse_publish_date("2023-02-01 09:30:00").is_some());
    }

    #[test]
    fn parses_rfc2822() {
        let dt = parse_publish_date("Wed, 01 Feb 2023 09:30:00 +0000").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-02-01T09:30:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_publish_date("next tuesday").is_none());
        assert!(parse_publish_date("2023-13-01").is_none());
        assert!(parse_publish_date("").is_none());
    }
}
