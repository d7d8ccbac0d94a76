//! # Object Identifiers
//!
//! Defines `Identifier`, the `<object-type>--<guid>` pair that names a
//! threat-intelligence object. The constructor validates both halves, so
//! holding an `Identifier` means holding a well-formed reference.
//!
//! ## Invariant
//!
//! The type token is lowercase alphanumeric with single dashes and the
//! suffix is a hyphenated RFC 4122 UUID. Reference properties in the
//! object model validate candidate strings by parsing them into this type.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;

/// A validated object identifier of the form `<object-type>--<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: String,
    uuid: Uuid,
}

impl Identifier {
    /// Build an identifier from a kind token and a UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind token is empty or contains characters
    /// other than lowercase ASCII alphanumerics and single dashes.
    pub fn new(kind: &str, uuid: Uuid) -> Result<Self, CoreError> {
        validate_kind_token(kind)?;
        Ok(Self {
            kind: kind.to_string(),
            uuid,
        })
    }

    /// Parse an identifier string, validating the `<object-type>--<guid>`
    /// shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is missing, the type token is
    /// malformed, or the suffix is not a hyphenated RFC 4122 UUID.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let (kind, suffix) = s
            .split_once("--")
            .ok_or_else(|| CoreError::Identifier(format!("{s:?} has no '--' separator")))?;
        validate_kind_token(kind)?;
        // Uuid::parse_str also accepts braced, URN, and bare-hex forms;
        // identifiers only ever carry the 36-char hyphenated form.
        if suffix.len() != 36 {
            return Err(CoreError::Identifier(format!(
                "{suffix:?} is not a hyphenated UUID"
            )));
        }
        let uuid = Uuid::parse_str(suffix)
            .map_err(|e| CoreError::Identifier(format!("{suffix:?}: {e}")))?;
        Ok(Self {
            kind: kind.to_string(),
            uuid,
        })
    }

    /// The object-type token (e.g. `indicator`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The UUID suffix.
    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}--{}", self.kind, self.uuid)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Identifier;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an identifier of the form <object-type>--<guid>")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Identifier, E> {
                Identifier::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}

fn validate_kind_token(kind: &str) -> Result<(), CoreError> {
    if kind.is_empty() {
        return Err(CoreError::Identifier("empty object-type token".to_string()));
    }
    let well_formed = kind
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !kind.starts_with('-')
        && !kind.ends_with('-');
    if !well_formed {
        return Err(CoreError::Identifier(format!(
            "{kind:?} is not a valid object-type token"
        )));
    }
    Ok(())
}
