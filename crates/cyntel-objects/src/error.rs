//! # Error Types — Construction and Access Failures
//!
//! Every failure mode of record construction maps to one variant here.
//! The rendered message text is a compatibility contract: consumers match
//! on it, so the wording is fixed and tested, not free-form.

use thiserror::Error;

/// Errors raised by schema lookup, record construction, and mutation
/// attempts.
///
/// Construction is all-or-nothing: when any variant is returned, no
/// partial record exists. All failures are deterministic for a given
/// input and must not be retried.
#[derive(Error, Debug)]
pub enum ObjectError {
    /// One or more supplied property names are not declared for the kind.
    /// Raised before any defaulting or validation runs; names appear in
    /// the order they were supplied.
    #[error("unexpected keyword arguments: [{}]", quoted(.0))]
    UnexpectedProperties(Vec<String>),

    /// One or more required properties were still unresolved after
    /// defaulting. All offending names are reported together, in schema
    /// declaration order.
    #[error("Missing required field(s) for {}: ({}).", .display, .names.join(", "))]
    MissingProperties {
        /// Display name of the kind (e.g. `Indicator`).
        display: String,
        /// Missing property names in declaration order.
        names: Vec<String>,
    },

    /// A resolved value failed its descriptor's validator. Reporting
    /// stops at the first violation in declaration order.
    #[error("Invalid value for {display} '{property}': {constraint}.")]
    InvalidValue {
        /// Display name of the kind.
        display: String,
        /// The violating property.
        property: String,
        /// The validator's constraint description, verbatim.
        constraint: String,
    },

    /// A mutation was attempted on a constructed record.
    #[error("Cannot modify properties after creation.")]
    ImmutableObject,

    /// No schema is registered for the requested kind.
    #[error("unknown object kind '{0}'")]
    UnknownKind(String),
}

/// Render property names the way the message contract requires:
/// single-quoted, comma-separated.
fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
