use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Format used by databases created before timestamps were stored as RFC 3339.
const LEGACY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, LEGACY_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .with_context(|| format!("failed to parse {field} from '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn parses_rfc3339_timestamps() {
        let parsed = parse_datetime("2024-03-05T10:20:30.123456789+00:00", "created_at").unwrap();
        assert_eq!(parsed.nanosecond(), 123_456_789);
        assert_eq!(parsed.day(), 5);
    }

    #[test]
    fn parses_legacy_naive_timestamps_as_utc() {
        let parsed = parse_datetime("2024-03-05 10:20:30.500000", "created_at").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let err = parse_datetime("yesterday", "created_at").unwrap_err();
        assert!(err.to_string().contains("created_at"));
    }

    #[test]
    fn integer_conversions_guard_their_ranges() {
        assert_eq!(to_i64(42).unwrap(), 42);
        assert!(to_i64(u64::MAX).is_err());
        assert!(to_u64(-1, "position").is_err());
    }
}
