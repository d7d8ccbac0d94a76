//! # Immutable Records
//!
//! `Record::construct` turns a kind name plus caller-supplied properties
//! into a validated, frozen record. The construction order is fixed:
//!
//! 1. Reject unknown property names — before any defaulting or
//!    validation runs, preserving the order the names were supplied.
//! 2. Resolve fields in schema declaration order, feeding
//!    already-resolved siblings into later defaults.
//! 3. Collect every missing required field and report the full set.
//! 4. Validate resolved values in declaration order; the first failure
//!    is reported.
//! 5. Assemble the declaration-ordered mapping and freeze it.
//!
//! A constructed record is self-contained: reading and serializing it
//! never consults the registry again. No mutation path exists — the
//! assembly happens on a local buffer inside `construct`, and the
//! public type exposes readers only.

use cyntel_core::Timestamp;

use crate::env::Environment;
use crate::error::ObjectError;
use crate::property::ResolveContext;
use crate::schema::Registry;
use crate::sdo::standard_registry;
use crate::value::PropertyValue;

/// The caller's keyword arguments: an insertion-ordered set of
/// name/value pairs. Setting a name twice replaces the earlier value in
/// place.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    /// An empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property, returning `self` for chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Look up a supplied value by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The supplied pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of supplied properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no properties were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A validated, immutable instance of an object kind.
///
/// Fields live in an ordered mapping (schema declaration order) that is
/// frozen at construction. Equality is value-wise over the kind and the
/// resolved mapping.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    kind: &'static str,
    display_name: &'static str,
    fields: Vec<(String, PropertyValue)>,
}

impl Record {
    /// Construct a record of `kind` from the standard registry, using
    /// the system clock and random identifiers.
    ///
    /// # Errors
    ///
    /// See [`Record::construct_in`].
    pub fn construct(kind: &str, props: Properties) -> Result<Self, ObjectError> {
        Self::construct_with(kind, props, &Environment::default())
    }

    /// Construct a record of `kind` from the standard registry against
    /// an explicit capability environment.
    ///
    /// # Errors
    ///
    /// See [`Record::construct_in`].
    pub fn construct_with(
        kind: &str,
        props: Properties,
        env: &Environment,
    ) -> Result<Self, ObjectError> {
        Self::construct_in(standard_registry(), kind, props, env)
    }

    /// Construct a record of `kind` from an explicit registry.
    ///
    /// # Errors
    ///
    /// - [`ObjectError::UnknownKind`] if `kind` has no registered schema.
    /// - [`ObjectError::UnexpectedProperties`] if any supplied name is
    ///   not declared for the kind.
    /// - [`ObjectError::MissingProperties`] if required fields are still
    ///   unresolved after defaulting (all of them, together).
    /// - [`ObjectError::InvalidValue`] for the first resolved value, in
    ///   declaration order, that fails its validator.
    pub fn construct_in(
        registry: &Registry,
        kind: &str,
        props: Properties,
        env: &Environment,
    ) -> Result<Self, ObjectError> {
        let schema = registry.get(kind)?;

        let unexpected: Vec<String> = props
            .iter()
            .filter(|(name, _)| !schema.contains(name))
            .map(|(name, _)| name.to_string())
            .collect();
        if !unexpected.is_empty() {
            return Err(ObjectError::UnexpectedProperties(unexpected));
        }

        let mut fields: Vec<(String, PropertyValue)> =
            Vec::with_capacity(schema.properties().len());
        let mut missing: Vec<String> = Vec::new();
        for descriptor in schema.properties() {
            let explicit = props.get(descriptor.name()).cloned();
            let resolved = {
                let ctx = ResolveContext::new(schema.kind(), &fields, env);
                descriptor.resolve(explicit, &ctx)
            };
            match resolved {
                Some(value) => fields.push((descriptor.name().to_string(), value)),
                None if descriptor.is_required() => {
                    missing.push(descriptor.name().to_string());
                }
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(ObjectError::MissingProperties {
                display: schema.display_name().to_string(),
                names: missing,
            });
        }

        for descriptor in schema.properties() {
            if let Some((_, value)) = fields.iter().find(|(n, _)| n == descriptor.name()) {
                if let Err(constraint) = descriptor.validate(value) {
                    return Err(ObjectError::InvalidValue {
                        display: schema.display_name().to_string(),
                        property: descriptor.name().to_string(),
                        constraint,
                    });
                }
            }
        }

        Ok(Self {
            kind: schema.kind(),
            display_name: schema.display_name(),
            fields,
        })
    }

    /// The record's kind name.
    pub fn kind(&self) -> &str {
        self.kind
    }

    /// The kind's display name (e.g. `Indicator`).
    pub fn display_name(&self) -> &str {
        self.display_name
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The resolved fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The resolved field names in schema declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// The `type` field. Always present and validated equal to the kind
    /// name, so the kind is returned if the field were ever absent.
    pub fn object_type(&self) -> &str {
        match self.get("type") {
            Some(PropertyValue::String(s)) => s,
            _ => self.kind,
        }
    }

    /// The `id` field, when present.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(PropertyValue::as_str)
    }

    /// The `created` timestamp, when present.
    pub fn created(&self) -> Option<&Timestamp> {
        self.get("created").and_then(PropertyValue::as_timestamp)
    }

    /// The `modified` timestamp, when present.
    pub fn modified(&self) -> Option<&Timestamp> {
        self.get("modified").and_then(PropertyValue::as_timestamp)
    }

    /// Refuse a mutation. Records are frozen at construction, so every
    /// call returns [`ObjectError::ImmutableObject`].
    pub fn set(&self, _name: &str, _value: PropertyValue) -> Result<(), ObjectError> {
        Err(ObjectError::ImmutableObject)
    }
}

/// Key-style read access. Yields the same values as the named accessors.
///
/// # Panics
///
/// Panics if the record has no field with that name; use
/// [`Record::get`] for fallible lookup.
impl std::ops::Index<&str> for Record {
    type Output = PropertyValue;

    fn index(&self, name: &str) -> &PropertyValue {
        match self.get(name) {
            Some(value) => value,
            None => panic!("record of kind '{}' has no field '{name}'", self.kind),
        }
    }
}

/// Single-line representation in schema declaration order:
/// `Indicator(type="indicator", id="indicator--...", ...)`, with each
/// value in its native literal syntax.
impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.display_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        write!(f, ")")
    }
}
