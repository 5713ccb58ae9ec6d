//! Backend timestamps
//!
//! The backend emits a mix of RFC 3339 strings and naive ISO-8601 strings
//! (no offset). The raw text is kept as sent; parsing happens on demand.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date taken from the leading `YYYY-MM-DD` of the raw text.
    pub fn date(&self) -> Option<NaiveDate> {
        let head = self.0.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Point in time; naive values are read as UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(parsed.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&self.0, format).ok())
            .or_else(|| self.date().and_then(|date| date.and_hms_opt(0, 0, 0)))
            .map(|naive| naive.and_utc())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// Newest-first ordering; values that do not parse sort after everything else.
pub fn newest_first(a: Option<&Timestamp>, b: Option<&Timestamp>) -> Ordering {
    let a = a.and_then(Timestamp::instant);
    let b = b.and_then(Timestamp::instant);
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_naive_and_offset_forms() {
        let naive = Timestamp::new("2025-03-14T09:26:53.589793");
        let offset = Timestamp::new("2025-03-14T23:59:00+02:00");

        let expected = NaiveDate::from_ymd_opt(2025, 3, 14);
        assert_eq!(naive.date(), expected);
        assert_eq!(offset.date(), expected);
    }

    #[test]
    fn test_instant_parses_every_supported_form() {
        assert!(Timestamp::new("2025-03-14T09:26:53Z").instant().is_some());
        assert!(Timestamp::new("2025-03-14T09:26:53.5").instant().is_some());
        assert!(Timestamp::new("2025-03-14 09:26:53").instant().is_some());
        assert!(Timestamp::new("2025-03-14").instant().is_some());
        assert!(Timestamp::new("yesterday").instant().is_none());
    }

    #[test]
    fn test_newest_first_puts_unparseable_last() {
        let old = Timestamp::new("2024-01-01T00:00:00");
        let new = Timestamp::new("2025-01-01T00:00:00");
        let junk = Timestamp::new("n/a");

        assert_eq!(newest_first(Some(&new), Some(&old)), Ordering::Less);
        assert_eq!(newest_first(Some(&junk), Some(&old)), Ordering::Greater);
        assert_eq!(newest_first(None, Some(&old)), Ordering::Greater);
        assert_eq!(newest_first(None, Some(&junk)), Ordering::Equal);
    }

    #[test]
    fn test_numeric_timestamps_are_accepted() {
        let ts: Timestamp = serde_json::from_str("1700000000").unwrap();
        assert_eq!(ts.as_str(), "1700000000");
        assert_eq!(ts.date(), None);
    }
}
