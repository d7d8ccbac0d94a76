//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, the single timestamp type used across CYNTEL.
//! A `Timestamp` is always UTC and always truncated to whole seconds,
//! so a given instant has exactly one textual rendering:
//! `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Invariant
//!
//! Canonical serialization must be deterministic. Offsets other than `Z`
//! or sub-second precision would give the same instant several textual
//! forms, so both are removed at the construction boundary: offset input
//! is converted to UTC and sub-seconds are truncated.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A UTC timestamp truncated to whole seconds.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::from_ymd_hms()`] — from calendar components.
/// - [`Timestamp::parse()`] — from an RFC 3339 string; any offset is
///   accepted and converted to UTC.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from UTC calendar components.
    ///
    /// # Errors
    ///
    /// Returns an error if the components do not name a valid instant
    /// (e.g. month 13 or hour 25).
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Result<Self, CoreError> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
            .ok_or_else(|| {
                CoreError::Timestamp(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}:{sec:02} is not a valid instant"
                ))
            })
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Any offset is accepted — `Z`, `+00:00`, `+05:30` — and converted
    /// to UTC. Sub-second precision is truncated. The parsed value
    /// therefore always renders with the `Z` suffix regardless of the
    /// input's original offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CoreError::Timestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if `secs` is outside the representable range.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CoreError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| CoreError::Timestamp(format!("epoch seconds out of range: {secs}")))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO 8601 with Z suffix (e.g. `2017-01-01T00:00:01Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

// Debug renders the bare ISO form; record representations embed it
// unquoted, the way a datetime literal would appear.
impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

// Serialize as the canonical ISO string rather than chrono's default so
// the wire form is bit-exact with `to_iso8601()`.
impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IsoVisitor;

        impl Visitor<'_> for IsoVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an RFC 3339 timestamp string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                Timestamp::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IsoVisitor)
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 1).unwrap();
        let dt_with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(dt_with_nanos);
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_from_ymd_hms() {
        let ts = Timestamp::from_ymd_hms(2017, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_from_ymd_hms_rejects_invalid() {
        assert!(Timestamp::from_ymd_hms(2017, 13, 1, 0, 0, 0).is_err());
        assert!(Timestamp::from_ymd_hms(2017, 2, 30, 0, 0, 0).is_err());
    }

    #[test]
    fn test_parse_z_suffix() {
        let ts = Timestamp::parse("2017-01-01T00:00:01Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        let ts = Timestamp::parse("2017-01-01T05:00:01+05:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");

        let ts = Timestamp::parse("2016-12-31T20:00:01-04:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_parse_plus_zero_offset() {
        let ts = Timestamp::parse("2017-01-01T00:00:01+00:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_parse_subseconds_truncated() {
        let ts = Timestamp::parse("2017-01-01T00:00:01.999999Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("2017-01-01").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_display_and_debug_match_iso8601() {
        let ts = Timestamp::from_ymd_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(format!("{ts}"), "1970-01-01T00:00:01Z");
        assert_eq!(format!("{ts:?}"), "1970-01-01T00:00:01Z");
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::parse("2017-01-01T00:00:01Z").unwrap();
        let later = Timestamp::parse("2017-01-01T00:00:02Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_epoch_secs() {
        let ts = Timestamp::parse("1970-01-01T00:00:01Z").unwrap();
        assert_eq!(ts.epoch_secs(), 1);
    }

    #[test]
    fn test_epoch_roundtrip() {
        let ts = Timestamp::parse("2017-01-01T00:00:01Z").unwrap();
        let ts2 = Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap();
        assert_eq!(ts, ts2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let ts = Timestamp::parse("2017-01-01T00:00:01Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2017-01-01T00:00:01Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }

    #[test]
    fn test_deserialize_normalizes_offset() {
        let parsed: Timestamp = serde_json::from_str("\"2017-01-01T05:00:01+05:00\"").unwrap();
        assert_eq!(parsed.to_iso8601(), "2017-01-01T00:00:01Z");
    }
}
