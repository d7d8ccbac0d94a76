//! # Schema Registry
//!
//! A `Schema` is the ordered descriptor list for one object kind; the
//! `Registry` maps kind names to schemas. Registration happens once at
//! setup, after which the registry is read-only shared state — safe for
//! unsynchronized concurrent reads because no writer exists.
//!
//! ## Composition rule
//!
//! Every schema is the common base descriptor list followed by the
//! kind's own descriptors, in declaration order. The base `type` and
//! `id` entries are parameterized by the kind (literal value, id
//! prefix), and a kind-specific descriptor that reuses a base name
//! replaces the base entry in place, keeping its position.

use std::collections::HashMap;

use crate::error::ObjectError;
use crate::property::PropertyDescriptor;

/// The ordered property descriptors for one object kind.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: &'static str,
    display_name: &'static str,
    properties: Vec<PropertyDescriptor>,
}

impl Schema {
    /// Compose a schema: common base properties for `kind`, then the
    /// kind-specific descriptors. A specific descriptor whose name
    /// matches a base entry overrides it in place.
    pub fn new(
        kind: &'static str,
        display_name: &'static str,
        specifics: Vec<PropertyDescriptor>,
    ) -> Self {
        let mut properties = common_properties(kind);
        for descriptor in specifics {
            match properties
                .iter_mut()
                .find(|existing| existing.name() == descriptor.name())
            {
                Some(slot) => *slot = descriptor,
                None => properties.push(descriptor),
            }
        }
        Self {
            kind,
            display_name,
            properties,
        }
    }

    /// The kind name (e.g. `indicator`).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The capitalized display name used in error messages
    /// (e.g. `Indicator`).
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// The descriptors in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Look up a descriptor by field name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|d| d.name() == name)
    }

    /// Whether the schema declares a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

/// The base descriptors shared by every kind, in declaration order.
/// `type` and `id` are parameterized by the kind; `created` defaults to
/// the injected clock and `modified` defaults to the resolved `created`.
fn common_properties(kind: &'static str) -> Vec<PropertyDescriptor> {
    vec![
        PropertyDescriptor::literal("type", kind),
        PropertyDescriptor::object_id(kind),
        PropertyDescriptor::reference("created_by_ref"),
        PropertyDescriptor::timestamp("created").default_now(),
        PropertyDescriptor::timestamp("modified").default_from("created"),
        PropertyDescriptor::boolean("revoked"),
    ]
}

/// Kind name → schema. Built once, then read-only.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: HashMap<&'static str, Schema>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its kind name. Registering the same kind
    /// twice replaces the earlier entry; registration is a setup-time
    /// operation, not exposed to runtime construction callers.
    pub fn register(&mut self, schema: Schema) {
        self.schemas.insert(schema.kind(), schema);
    }

    /// The schema for a kind.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::UnknownKind`] if the kind was never
    /// registered.
    pub fn get(&self, kind: &str) -> Result<&Schema, ObjectError> {
        self.schemas
            .get(kind)
            .ok_or_else(|| ObjectError::UnknownKind(kind.to_string()))
    }

    /// The registered kind names, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::ValueKind;

    #[test]
    fn test_composition_order_base_then_specific() {
        let schema = Schema::new(
            "indicator",
            "Indicator",
            vec![
                PropertyDescriptor::string_list("labels").required(),
                PropertyDescriptor::string("pattern").required(),
            ],
        );
        let names: Vec<&str> = schema.properties().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec!["type", "id", "created_by_ref", "created", "modified", "revoked", "labels", "pattern"]
        );
    }

    #[test]
    fn test_specific_overrides_base_in_place() {
        let schema = Schema::new(
            "indicator",
            "Indicator",
            vec![PropertyDescriptor::string("revoked")],
        );
        let names: Vec<&str> = schema.properties().iter().map(|d| d.name()).collect();
        // Position preserved, shape replaced.
        assert_eq!(names[5], "revoked");
        assert_eq!(
            schema.property("revoked").unwrap().value_kind(),
            ValueKind::String
        );
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_descriptor_names_unique() {
        let schema = Schema::new(
            "indicator",
            "Indicator",
            vec![
                PropertyDescriptor::string_list("labels").required(),
                PropertyDescriptor::string("pattern").required(),
            ],
        );
        let mut names: Vec<&str> = schema.properties().iter().map(|d| d.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), schema.properties().len());
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = Registry::new();
        registry.register(Schema::new("indicator", "Indicator", Vec::new()));
        assert!(registry.get("indicator").is_ok());
    }

    #[test]
    fn test_registry_unknown_kind() {
        let registry = Registry::new();
        let err = registry.get("xxx").unwrap_err();
        assert_eq!(err.to_string(), "unknown object kind 'xxx'");
    }

    #[test]
    fn test_base_type_literal_is_kind_specific() {
        let schema = Schema::new("malware", "Malware", Vec::new());
        let type_desc = schema.property("type").unwrap();
        assert!(type_desc
            .validate(&crate::value::PropertyValue::from("malware"))
            .is_ok());
        assert!(type_desc
            .validate(&crate::value::PropertyValue::from("indicator"))
            .is_err());
    }
}
