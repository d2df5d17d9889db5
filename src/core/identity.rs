//! Presence identity: normalized names plus the parsed timestamp

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde_json::Value;
use std::borrow::Cow;

use super::error::{DedupError, Result};
use super::model::Presence;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

// No offset: read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Trim and lower-case a name for comparison. `None` counts as empty.
pub fn normalize_name(name: Option<&str>) -> String {
    name.unwrap_or("").trim().to_lowercase()
}

/// Parse an ISO-8601 timestamp, reading a trailing `Z` as `+00:00`
///
/// Leap seconds (`:60`) are rejected, as are hour-only times and `+HH`
/// offsets without minutes.
///
/// # Returns
/// The instant in UTC, or `None` if the value is not a recognised form
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // Only an upper-case `Z` means UTC; a lower-case `z` stays and fails to parse.
    let value = match raw.strip_suffix('Z') {
        Some(rest) => Cow::Owned(format!("{rest}+00:00")),
        None => Cow::Borrowed(raw),
    };

    parse_instant(&value).filter(|instant| instant.nanosecond() < 1_000_000_000)
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Composite identity of a presence inside one day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresenceKey {
    pub nom: String,
    pub prenom: String,
    /// Unix epoch timestamp in microseconds
    pub timestamp: i64,
}

impl PresenceKey {
    /// Build the key of the `index`-th presence of `day`
    pub fn from_value(value: &Value, day: &str, index: usize) -> Result<Self> {
        let presence = Presence::from_value(value).map_err(|source| DedupError::MalformedPresence {
            day: day.to_string(),
            index,
            source,
        })?;

        let raw_date = presence.date.as_deref().ok_or_else(|| DedupError::MissingTimestamp {
            day: day.to_string(),
            index,
        })?;
        let timestamp = parse_timestamp(raw_date).ok_or_else(|| DedupError::InvalidTimestamp {
            day: day.to_string(),
            index,
            value: raw_date.to_string(),
        })?;

        Ok(Self {
            nom: normalize_name(presence.nom.as_deref()),
            prenom: normalize_name(presence.prenom.as_deref()),
            timestamp: timestamp.timestamp_micros(),
        })
    }
}
