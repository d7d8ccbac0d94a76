//! # Canonical Serialization
//!
//! The canonical textual form of a record is the externally-observable
//! wire contract and must be bit-exact: keys sorted lexicographically,
//! 2-space indentation, arrays one element per line, timestamps rendered
//! `YYYY-MM-DDTHH:MM:SSZ`. `Display` for `Record` is this form.
//!
//! The `Serialize` impl produces the same mapping, which is what feeds
//! `CanonicalBytes` for compact JCS bytes and content digests.

use serde::ser::{Serialize, SerializeMap, Serializer};

use cyntel_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest};

use crate::record::Record;

impl Record {
    /// The record as a JSON value. Keys come out sorted because
    /// `serde_json`'s map is ordered by key; timestamps become their
    /// ISO 8601 Z-suffixed strings.
    pub fn to_json_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// The canonical pretty-printed textual form.
    pub fn to_json(&self) -> String {
        self.to_string()
    }

    /// A stable content digest over the record's compact canonical
    /// (RFC 8785) bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if canonicalization fails; record values are
    /// produced by the typed property model, so this does not occur in
    /// practice.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        Ok(sha256_digest(&CanonicalBytes::new(self)?))
    }
}

/// Canonical pretty form: sorted keys, 2-space indentation, arrays one
/// element per line.
impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pretty =
            serde_json::to_string_pretty(&self.to_json_value()).map_err(|_| std::fmt::Error)?;
        f.write_str(&pretty)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Emit keys sorted so every consumer sees the same order as the
        // canonical forms.
        let mut entries: Vec<(&str, serde_json::Value)> =
            self.iter().map(|(name, value)| (name, value.to_json())).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let mut state = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in &entries {
            state.serialize_entry(name, value)?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::record::Properties;
    use crate::sdo;
    use cyntel_core::Timestamp;
    use uuid::Uuid;

    fn sample_record() -> Record {
        let env = Environment::fixed(
            Timestamp::from_ymd_hms(2017, 1, 1, 0, 0, 1).unwrap(),
            Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        );
        let props = Properties::new()
            .set("labels", ["malicious-activity"])
            .set("pattern", "[file:hashes.MD5 = 'd41d8cd98f00b204e9800998ecf8427e']");
        Record::construct_with(sdo::INDICATOR, props, &env).unwrap()
    }

    #[test]
    fn test_pretty_form_sorted_keys_two_space_indent() {
        let record = sample_record();
        let expected = "{\n  \"created\": \"2017-01-01T00:00:01Z\",\n  \"id\": \"indicator--00000000-0000-0000-0000-000000000001\",\n  \"labels\": [\n    \"malicious-activity\"\n  ],\n  \"modified\": \"2017-01-01T00:00:01Z\",\n  \"pattern\": \"[file:hashes.MD5 = 'd41d8cd98f00b204e9800998ecf8427e']\",\n  \"type\": \"indicator\",\n  \"valid_from\": \"2017-01-01T00:00:01Z\"\n}";
        assert_eq!(record.to_json(), expected);
        assert_eq!(format!("{record}"), expected);
    }

    #[test]
    fn test_json_value_keys_sorted() {
        let record = sample_record();
        let value = record.to_json_value();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_roundtrip_reproduces_field_set() {
        let record = sample_record();
        let parsed: serde_json::Value = serde_json::from_str(&record.to_json()).unwrap();
        assert_eq!(parsed, record.to_json_value());
    }

    #[test]
    fn test_serialize_impl_matches_json_value() {
        let record = sample_record();
        let via_serde = serde_json::to_value(&record).unwrap();
        assert_eq!(via_serde, record.to_json_value());
    }

    #[test]
    fn test_digest_stable() {
        let a = sample_record();
        let b = sample_record();
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }

    #[test]
    fn test_digest_changes_with_content() {
        let a = sample_record();
        let env = Environment::fixed(
            Timestamp::from_ymd_hms(2017, 1, 1, 0, 0, 1).unwrap(),
            Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap(),
        );
        let props = Properties::new()
            .set("labels", ["malicious-activity"])
            .set("pattern", "[file:hashes.MD5 = 'd41d8cd98f00b204e9800998ecf8427e']");
        let b = Record::construct_with(sdo::INDICATOR, props, &env).unwrap();
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    }
}
