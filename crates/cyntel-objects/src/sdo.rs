//! # Standard Domain Objects
//!
//! The schemas for the standard kinds, and the shared registry built
//! from them. Each kind gets a thin constructor so call sites read as
//! `sdo::indicator(props)` rather than spelling the kind string.

use std::sync::OnceLock;

use crate::env::Environment;
use crate::error::ObjectError;
use crate::property::PropertyDescriptor;
use crate::record::{Properties, Record};
use crate::schema::{Registry, Schema};

/// Kind name of the indicator object.
pub const INDICATOR: &str = "indicator";
/// Kind name of the malware object.
pub const MALWARE: &str = "malware";
/// Kind name of the relationship object.
pub const RELATIONSHIP: &str = "relationship";

fn indicator_schema() -> Schema {
    Schema::new(
        "indicator",
        "Indicator",
        vec![
            PropertyDescriptor::string_list("labels").required(),
            // The pattern is carried as an opaque validated string; its
            // mini-language is not parsed here.
            PropertyDescriptor::string("pattern").required(),
            PropertyDescriptor::timestamp("valid_from").default_now(),
        ],
    )
}

fn malware_schema() -> Schema {
    Schema::new(
        "malware",
        "Malware",
        vec![
            PropertyDescriptor::string_list("labels").required(),
            PropertyDescriptor::string("name").required(),
        ],
    )
}

fn relationship_schema() -> Schema {
    Schema::new(
        "relationship",
        "Relationship",
        vec![
            PropertyDescriptor::string("relationship_type").required(),
            PropertyDescriptor::reference("source_ref").required(),
            PropertyDescriptor::reference("target_ref").required(),
        ],
    )
}

/// The process-wide registry of standard kinds. Built on first use,
/// read-only afterwards; concurrent readers need no synchronization.
pub fn standard_registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        registry.register(indicator_schema());
        registry.register(malware_schema());
        registry.register(relationship_schema());
        registry
    })
}

/// Construct an indicator with the default environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn indicator(props: Properties) -> Result<Record, ObjectError> {
    Record::construct(INDICATOR, props)
}

/// Construct an indicator against an explicit environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn indicator_with(props: Properties, env: &Environment) -> Result<Record, ObjectError> {
    Record::construct_with(INDICATOR, props, env)
}

/// Construct a malware object with the default environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn malware(props: Properties) -> Result<Record, ObjectError> {
    Record::construct(MALWARE, props)
}

/// Construct a malware object against an explicit environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn malware_with(props: Properties, env: &Environment) -> Result<Record, ObjectError> {
    Record::construct_with(MALWARE, props, env)
}

/// Construct a relationship with the default environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn relationship(props: Properties) -> Result<Record, ObjectError> {
    Record::construct(RELATIONSHIP, props)
}

/// Construct a relationship against an explicit environment.
///
/// # Errors
///
/// See [`Record::construct_in`].
pub fn relationship_with(props: Properties, env: &Environment) -> Result<Record, ObjectError> {
    Record::construct_with(RELATIONSHIP, props, env)
}
