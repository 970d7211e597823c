//! Offset-free `send_at` timestamps.
//!
//! Every write path goes through [`parse`]: offset-aware input is converted to
//! UTC before the offset is dropped, and precision is truncated to
//! microseconds so the in-memory and PostgreSQL stores agree.

use serde::{Deserialize, Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTimestamp;

impl std::fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid datetime, expected ISO-8601 such as 2025-01-01T00:00:00")
    }
}

impl std::error::Error for InvalidTimestamp {}

pub fn parse(input: &str) -> Result<PrimitiveDateTime, InvalidTimestamp> {
    let input = input.trim();

    if let Ok(aware) = OffsetDateTime::parse(input, &Rfc3339) {
        let offset = Duration::seconds(i64::from(aware.offset().whole_seconds()));
        let utc = PrimitiveDateTime::new(aware.date(), aware.time())
            .checked_sub(offset)
            .ok_or(InvalidTimestamp)?;
        return truncate_to_micros(utc);
    }

    let naive = PrimitiveDateTime::parse(
        input,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            input,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(input, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            input,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            input,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        Date::parse(input, format_description!("[year]-[month]-[day]")).map(Date::midnight)
    })
    .map_err(|_| InvalidTimestamp)?;

    truncate_to_micros(naive)
}

pub fn format(value: &PrimitiveDateTime) -> Result<String, time::error::Format> {
    if value.nanosecond() == 0 {
        value.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]"
        ))
    } else {
        value.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]"
        ))
    }
}

fn truncate_to_micros(value: PrimitiveDateTime) -> Result<PrimitiveDateTime, InvalidTimestamp> {
    value
        .replace_nanosecond(value.nanosecond() / 1_000 * 1_000)
        .map_err(|_| InvalidTimestamp)
}

pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = format(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_naive_seconds() {
        assert_eq!(
            parse("2025-01-01T00:00:00").unwrap(),
            datetime!(2025-01-01 00:00:00)
        );
    }

    #[test]
    fn parses_date_only_as_midnight() {
        assert_eq!(parse("2025-12-28").unwrap(), datetime!(2025-12-28 00:00:00));
    }

    #[test]
    fn parses_minutes_and_space_separator() {
        assert_eq!(parse("2025-06-01T08:30").unwrap(), datetime!(2025-06-01 08:30:00));
        assert_eq!(
            parse("2025-06-01 08:30:15").unwrap(),
            datetime!(2025-06-01 08:30:15)
        );
    }

    #[test]
    fn converts_offset_input_to_utc() {
        assert_eq!(
            parse("2025-01-01T03:00:00+03:00").unwrap(),
            datetime!(2025-01-01 00:00:00)
        );
        assert_eq!(
            parse("2025-09-01T12:00:00Z").unwrap(),
            datetime!(2025-09-01 12:00:00)
        );
        // crosses midnight backwards
        assert_eq!(
            parse("2025-01-01T01:00:00+02:00").unwrap(),
            datetime!(2024-12-31 23:00:00)
        );
    }

    #[test]
    fn truncates_to_microseconds() {
        let parsed = parse("2025-01-01T00:00:00.123456789").unwrap();
        assert_eq!(parsed, datetime!(2025-01-01 00:00:00.123456));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("tomorrow"), Err(InvalidTimestamp));
        assert_eq!(parse(""), Err(InvalidTimestamp));
        assert_eq!(parse("2025-13-01T00:00:00"), Err(InvalidTimestamp));
    }

    #[test]
    fn formats_without_fraction_when_whole_second() {
        assert_eq!(
            format(&datetime!(2025-01-01 00:00:00)).unwrap(),
            "2025-01-01T00:00:00"
        );
        assert_eq!(
            format(&datetime!(2025-01-01 00:00:00.5)).unwrap(),
            "2025-01-01T00:00:00.500000"
        );
    }
}
