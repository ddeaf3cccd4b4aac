//! Serde adapter for calendar dates stored as `YYYY-MM-DD`.
//!
//! Reads also accept full ISO timestamps (`2024-04-01T08:30:00.000Z`) and keep
//! only the date part, since older records were written that way.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(de::Error::custom)
}

/// Parses a `YYYY-MM-DD` date, ignoring any `T...` time suffix.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let date_part = raw.split('T').next().unwrap_or_default().trim();
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|err| format!("invalid date `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::parse_date;
    use chrono::NaiveDate;

    #[test]
    fn parses_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(parse_date("2024-04-01").unwrap(), expected);
        assert_eq!(parse_date("2024-04-01T08:30:00.000Z").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("").is_err());
        assert!(parse_date("01/04/2024").is_err());
    }
}
