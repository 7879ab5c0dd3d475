use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unable to parse time: {0}")]
pub struct TimeParseError(pub String);

/// Formats carrying an explicit numeric offset, tried after RFC 3339 to
/// cover offsets written without a colon. `%z` accepts both `+0700` and
/// `+07:00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a provider timestamp into its wall-clock components.
///
/// Accepts RFC 3339 with or without sub-seconds, with or without an explicit
/// offset, and naive `YYYY-MM-DDTHH:MM:SS`. An explicit offset is discarded:
/// the caller re-stamps the wall clock into the airport's zone, which is the
/// contract the rest of the pipeline depends on.
pub fn parse_flexible(value: &str) -> Result<NaiveDateTime, TimeParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    Err(TimeParseError(value.to_string()))
}

/// Stamps a wall-clock datetime with a fixed UTC offset.
pub fn at_offset(wall_clock: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = wall_clock - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Parses travel-time text like "1h 45m", "2h", or "45m" into minutes.
/// Unrecognized text yields zero, matching the lenient upstream contract.
pub fn parse_travel_time(value: &str) -> u32 {
    let mut minutes = 0u32;
    for part in value.split_whitespace() {
        if let Some(hours) = part.strip_suffix('h') {
            minutes += hours.parse::<u32>().unwrap_or(0) * 60;
        } else if let Some(mins) = part.strip_suffix('m') {
            minutes += mins.parse::<u32>().unwrap_or(0);
        }
    }
    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn parses_rfc3339_variants() {
        assert!(parse_flexible("2025-12-15T08:30:00+07:00").is_ok());
        assert!(parse_flexible("2025-12-15T08:30:00+0700").is_ok());
        assert!(parse_flexible("2025-12-15T08:30:00.123+07:00").is_ok());
        assert!(parse_flexible("2025-12-15T08:30:00Z").is_ok());
        assert!(parse_flexible("2025-12-15T08:30:00").is_ok());
        assert!(parse_flexible("2025-12-15 08:30:00").is_ok());
        assert!(parse_flexible("15/12/2025").is_err());
    }

    #[test]
    fn explicit_offset_is_reduced_to_wall_clock() {
        // The +09:00 stamp is dropped; only the clock face survives.
        let naive = parse_flexible("2025-12-15T08:30:00+09:00").unwrap();
        assert_eq!(naive.hour(), 8);
        assert_eq!(naive.minute(), 30);

        let stamped = at_offset(naive, wib());
        assert_eq!(stamped.to_rfc3339(), "2025-12-15T08:30:00+07:00");
    }

    #[test]
    fn naive_input_gets_the_airport_offset() {
        let naive = parse_flexible("2025-12-15T23:05:00").unwrap();
        let stamped = at_offset(naive, wib());
        assert_eq!(stamped.hour(), 23);
        assert_eq!(stamped.offset().local_minus_utc(), 7 * 3600);
        // Unix timestamp reflects the offset: 23:05 WIB is 16:05 UTC.
        assert_eq!(stamped.timestamp() % 86_400, 16 * 3600 + 5 * 60);
    }

    #[test]
    fn travel_time_parsing() {
        assert_eq!(parse_travel_time("1h 45m"), 105);
        assert_eq!(parse_travel_time("2h"), 120);
        assert_eq!(parse_travel_time("45m"), 45);
        assert_eq!(parse_travel_time("garbled"), 0);
    }
}
