//! Timestamp parsing for trip start times.

use chrono::NaiveDateTime;

const PRIMARY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Other layouts seen in city exports, tried in order.
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a timezone-less trip timestamp such as `2017-01-01 09:07:57`.
///
/// # Errors
///
/// Returns the primary layout's [`chrono::ParseError`] when no layout matches.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, PRIMARY_FORMAT).or_else(|err| {
        FALLBACK_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .ok_or(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_standard_layout() {
        let ts = parse_timestamp("2017-06-23 15:09:32").unwrap();
        assert_eq!(ts.month(), 6);
        assert_eq!(ts.day(), 23);
        assert_eq!(ts.hour(), 15);
    }

    #[test]
    fn test_parse_fractional_and_iso_layouts() {
        assert!(parse_timestamp("2017-06-23 15:09:32.123").is_ok());
        assert!(parse_timestamp("2017-06-23T15:09:32").is_ok());
        assert!(parse_timestamp(" 2017-06-23 15:09 ").is_ok());
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("not a date").is_err());
        assert!(parse_timestamp("2017-13-01 00:00:00").is_err());
    }
}
