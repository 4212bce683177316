use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

pub trait IntoUtcDateTime {
    fn into_utc(self) -> Option<DateTime<Utc>>;
}

/// Naive datetimes are wall-clock times in the machine's local timezone.
impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        Local
            .from_local_datetime(&self)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl IntoUtcDateTime for DateTime<Local> {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl IntoUtcDateTime for DateTime<Utc> {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        Some(self)
    }
}

impl IntoUtcDateTime for DateTime<FixedOffset> {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid start time '{0}', expected an ISO 8601 datetime such as 2024-03-16T08:00:00")]
pub struct StartTimeError(pub String);

/// Parses a race start time given on the command line.
///
/// Accepts RFC 3339 with an offset, or a naive `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// (the `T` may be a space) read as local time. A bare date means midnight.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>, StartTimeError> {
    let trimmed = input.trim();
    let err = || StartTimeError(input.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.into_utc().ok_or_else(err);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return naive.into_utc().ok_or_else(err);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .and_then(|dt| dt.into_utc())
            .ok_or_else(err);
    }
    Err(err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_offset() {
        let parsed = parse_start_time("2024-03-16T08:00:00+01:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 16, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_zulu() {
        let parsed = parse_start_time("2024-03-16T08:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_local() {
        let parsed = parse_start_time("2024-03-16T08:00:00").unwrap();
        let expected = Local
            .with_ymd_and_hms(2024, 3, 16, 8, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, expected);
        assert!(parse_start_time("2024-03-16 08:00").is_ok());
        assert!(parse_start_time("2024-03-16").is_ok());
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(
            parse_start_time("half past eight"),
            Err(StartTimeError("half past eight".to_string()))
        );
    }
}
