//! # Property Descriptors
//!
//! A `PropertyDescriptor` defines one field of an object kind: its value
//! shape, whether it is required, how a default is computed when the
//! caller omits it, and the validator that judges the resolved value.
//!
//! Descriptors are built once at schema-definition time and shared
//! read-only across every record of the kind; the closures they hold are
//! behind `Arc` and never mutated.
//!
//! ## Resolution contract
//!
//! `resolve(explicit, ctx)` yields the field's final value or `None`
//! (missing):
//!
//! - An explicit value passes through unmodified, with one format
//!   normalization: a string supplied for a timestamp field is parsed
//!   (any offset, converted to UTC). Text that does not parse is kept
//!   as-is for the validator to reject.
//! - An absent value with a default rule is computed from the
//!   `ResolveContext`, which exposes the sibling fields already resolved
//!   in declaration order — `modified` can read `created`, `id` can read
//!   the kind name.
//! - An absent value with no default yields `None`; required fields that
//!   end up missing are reported upstream.
//!
//! Validators return `Ok(())` or the constraint description used
//! verbatim in the error message (e.g. `must equal 'indicator'`).

use std::sync::Arc;

use cyntel_core::{Identifier, Timestamp};

use crate::env::{Clock, Environment, IdGenerator};
use crate::value::PropertyValue;

/// The shape a property's value must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form text (also opaque pattern strings).
    String,
    /// Strict boolean.
    Boolean,
    /// Second-precision UTC timestamp.
    Timestamp,
    /// A `<object-type>--<guid>` reference to another object.
    Reference,
    /// A list of text values.
    StringList,
    /// A fixed literal the value must equal.
    Literal,
}

/// Judges a resolved value; `Err` carries the constraint description.
pub type Validator = Arc<dyn Fn(&PropertyValue) -> Result<(), String> + Send + Sync>;

/// Computes a default from the resolution context.
pub type DefaultFn = Arc<dyn Fn(&ResolveContext<'_>) -> PropertyValue + Send + Sync>;

/// Read-only view handed to default-computation functions: the kind
/// under construction, the sibling fields resolved so far, and the
/// injected capabilities.
pub struct ResolveContext<'a> {
    kind: &'a str,
    resolved: &'a [(String, PropertyValue)],
    env: &'a Environment,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(
        kind: &'a str,
        resolved: &'a [(String, PropertyValue)],
        env: &'a Environment,
    ) -> Self {
        Self {
            kind,
            resolved,
            env,
        }
    }

    /// The kind name under construction.
    pub fn kind(&self) -> &str {
        self.kind
    }

    /// A sibling field's resolved value, if it resolved earlier in
    /// declaration order.
    pub fn resolved(&self, name: &str) -> Option<&PropertyValue> {
        self.resolved
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The injected clock.
    pub fn clock(&self) -> &dyn Clock {
        self.env.clock()
    }

    /// The injected identifier generator.
    pub fn ids(&self) -> &dyn IdGenerator {
        self.env.ids()
    }
}

/// Schema unit describing one field: shape, requiredness, default rule,
/// and validator.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: ValueKind,
    required: bool,
    default: Option<DefaultFn>,
    validator: Validator,
}

impl PropertyDescriptor {
    fn new(name: &'static str, kind: ValueKind, validator: Validator) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            validator,
        }
    }

    /// A free-form text property.
    pub fn string(name: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::String,
            Arc::new(|value| match value {
                PropertyValue::String(_) => Ok(()),
                _ => Err("must be a string value".to_string()),
            }),
        )
    }

    /// A strict boolean property; nothing is coerced, so `"no"` is
    /// invalid rather than false.
    pub fn boolean(name: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::Boolean,
            Arc::new(|value| match value {
                PropertyValue::Boolean(_) => Ok(()),
                _ => Err("must be a boolean value".to_string()),
            }),
        )
    }

    /// A timestamp property. Explicit string input is normalized through
    /// [`Timestamp::parse`] during resolution.
    pub fn timestamp(name: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::Timestamp,
            Arc::new(|value| match value {
                PropertyValue::Timestamp(_) => Ok(()),
                _ => Err("must be a valid RFC 3339 timestamp".to_string()),
            }),
        )
    }

    /// A reference to another object, validated against the
    /// `<object-type>--<guid>` shape.
    pub fn reference(name: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::Reference,
            Arc::new(|value| match value {
                PropertyValue::String(s) if Identifier::parse(s).is_ok() => Ok(()),
                _ => Err("must match <object-type>--<guid>".to_string()),
            }),
        )
    }

    /// A list-of-strings property.
    pub fn string_list(name: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::StringList,
            Arc::new(|value| match value {
                PropertyValue::List(_) => Ok(()),
                _ => Err("must be a list of strings".to_string()),
            }),
        )
    }

    /// A property whose value must equal a fixed literal; absent values
    /// default to that literal. Used for the `type` field, where each
    /// kind pins the literal to its own name.
    pub fn literal(name: &'static str, literal: &'static str) -> Self {
        Self::new(
            name,
            ValueKind::Literal,
            Arc::new(move |value| match value {
                PropertyValue::String(s) if s == literal => Ok(()),
                _ => Err(format!("must equal '{literal}'")),
            }),
        )
        .with_default(Arc::new(move |_| PropertyValue::String(literal.to_string())))
    }

    /// The `id` property for a kind: defaults to `<kind>--<fresh uuid>`,
    /// and explicit values must carry the kind's prefix.
    pub fn object_id(kind: &'static str) -> Self {
        let prefix = format!("{kind}--");
        Self::new(
            "id",
            ValueKind::Reference,
            Arc::new(move |value| match value {
                PropertyValue::String(s) if s.starts_with(&prefix) => Ok(()),
                _ => Err(format!("must start with '{kind}--'")),
            }),
        )
        .with_default(Arc::new(move |ctx| {
            PropertyValue::String(format!("{kind}--{}", ctx.ids().generate()))
        }))
    }

    /// Mark the property required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach an explicit default-computation function.
    pub fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    /// Replace the validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Default to the injected clock's current time.
    pub fn default_now(self) -> Self {
        self.with_default(Arc::new(|ctx| PropertyValue::Timestamp(ctx.clock().now())))
    }

    /// Default to a sibling field's resolved value. The sibling must be
    /// declared earlier; if it is somehow absent, the clock is used so
    /// the default stays total.
    pub fn default_from(self, sibling: &'static str) -> Self {
        self.with_default(Arc::new(move |ctx| {
            ctx.resolved(sibling)
                .cloned()
                .unwrap_or_else(|| PropertyValue::Timestamp(ctx.clock().now()))
        }))
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared value shape.
    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the field must be present after resolution.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Resolve the field's final value. See the module docs for the
    /// contract.
    pub fn resolve(
        &self,
        explicit: Option<PropertyValue>,
        ctx: &ResolveContext<'_>,
    ) -> Option<PropertyValue> {
        match explicit {
            Some(PropertyValue::String(s)) if self.kind == ValueKind::Timestamp => {
                match Timestamp::parse(&s) {
                    Ok(ts) => Some(PropertyValue::Timestamp(ts)),
                    // Unparseable text flows on to the validator, which
                    // rejects it with the field's constraint description.
                    Err(_) => Some(PropertyValue::String(s)),
                }
            }
            Some(value) => Some(value),
            None => self.default.as_ref().map(|compute| compute(ctx)),
        }
    }

    /// Run the validator against a resolved value.
    pub fn validate(&self, value: &PropertyValue) -> Result<(), String> {
        (self.validator)(value)
    }
}

impl std::fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn fixed_env() -> Environment {
        Environment::fixed(
            Timestamp::from_ymd_hms(2017, 1, 1, 0, 0, 1).unwrap(),
            Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        )
    }

    #[test]
    fn test_explicit_value_passes_through() {
        let desc = PropertyDescriptor::string("pattern").required();
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        let resolved = desc.resolve(Some(PropertyValue::from("[file]")), &ctx);
        assert_eq!(resolved, Some(PropertyValue::from("[file]")));
    }

    #[test]
    fn test_absent_without_default_is_missing() {
        let desc = PropertyDescriptor::string("pattern").required();
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        assert_eq!(desc.resolve(None, &ctx), None);
    }

    #[test]
    fn test_timestamp_string_is_normalized() {
        let desc = PropertyDescriptor::timestamp("created");
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        let resolved = desc
            .resolve(Some(PropertyValue::from("2017-01-01T05:00:01+05:00")), &ctx)
            .unwrap();
        let ts = resolved.as_timestamp().unwrap();
        assert_eq!(ts.to_iso8601(), "2017-01-01T00:00:01Z");
    }

    #[test]
    fn test_unparseable_timestamp_fails_validation() {
        let desc = PropertyDescriptor::timestamp("created");
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        let resolved = desc
            .resolve(Some(PropertyValue::from("yesterday")), &ctx)
            .unwrap();
        assert_eq!(
            desc.validate(&resolved),
            Err("must be a valid RFC 3339 timestamp".to_string())
        );
    }

    #[test]
    fn test_default_now_uses_injected_clock() {
        let desc = PropertyDescriptor::timestamp("created").default_now();
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        let resolved = desc.resolve(None, &ctx).unwrap();
        assert_eq!(
            resolved.as_timestamp().unwrap().to_iso8601(),
            "2017-01-01T00:00:01Z"
        );
    }

    #[test]
    fn test_default_from_reads_resolved_sibling() {
        let created = Timestamp::from_ymd_hms(2016, 6, 1, 12, 0, 0).unwrap();
        let resolved_siblings = vec![(
            "created".to_string(),
            PropertyValue::Timestamp(created),
        )];
        let desc = PropertyDescriptor::timestamp("modified").default_from("created");
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &resolved_siblings, &env);
        let resolved = desc.resolve(None, &ctx).unwrap();
        assert_eq!(resolved.as_timestamp(), Some(&created));
    }

    #[test]
    fn test_literal_defaults_and_validates() {
        let desc = PropertyDescriptor::literal("type", "indicator");
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        assert_eq!(
            desc.resolve(None, &ctx),
            Some(PropertyValue::from("indicator"))
        );
        assert!(desc.validate(&PropertyValue::from("indicator")).is_ok());
        assert_eq!(
            desc.validate(&PropertyValue::from("xxx")),
            Err("must equal 'indicator'".to_string())
        );
    }

    #[test]
    fn test_object_id_default_uses_injected_generator() {
        let desc = PropertyDescriptor::object_id("indicator");
        let env = fixed_env();
        let ctx = ResolveContext::new("indicator", &[], &env);
        let resolved = desc.resolve(None, &ctx).unwrap();
        assert_eq!(
            resolved.as_str(),
            Some("indicator--00000000-0000-0000-0000-000000000001")
        );
    }

    #[test]
    fn test_object_id_prefix_validation() {
        let desc = PropertyDescriptor::object_id("indicator");
        assert!(desc
            .validate(&PropertyValue::from("indicator--whatever"))
            .is_ok());
        assert_eq!(
            desc.validate(&PropertyValue::from("my-prefix--")),
            Err("must start with 'indicator--'".to_string())
        );
    }

    #[test]
    fn test_reference_validator() {
        let desc = PropertyDescriptor::reference("created_by_ref");
        assert!(desc
            .validate(&PropertyValue::from(
                "identity--01234567-89ab-cdef-0123-456789abcdef"
            ))
            .is_ok());
        assert_eq!(
            desc.validate(&PropertyValue::from("myprefix--12345678")),
            Err("must match <object-type>--<guid>".to_string())
        );
    }

    #[test]
    fn test_boolean_validator_rejects_strings() {
        let desc = PropertyDescriptor::boolean("revoked");
        assert!(desc.validate(&PropertyValue::from(true)).is_ok());
        assert_eq!(
            desc.validate(&PropertyValue::from("no")),
            Err("must be a boolean value".to_string())
        );
    }

    #[test]
    fn test_string_list_validator() {
        let desc = PropertyDescriptor::string_list("labels");
        assert!(desc.validate(&PropertyValue::from(["a"])).is_ok());
        assert_eq!(
            desc.validate(&PropertyValue::from("a")),
            Err("must be a list of strings".to_string())
        );
    }
}
