//! # cyntel-objects — Schema-Driven Object Modeling
//!
//! The object-modeling engine of CYNTEL: given a declarative schema of
//! named, typed properties per object kind, construct validated,
//! immutable records from caller-supplied properties; enforce required
//! fields, format constraints, and defaulting rules; and serialize
//! records to a canonical, deterministic textual form.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit descriptors, no reflection.** Each kind is an ordered
//!    list of `PropertyDescriptor` values holding validator and
//!    default-computation closures; resolution is plain iteration.
//!
//! 2. **Frozen by construction.** Assembly happens on a local buffer
//!    inside `Record::construct`; the public `Record` type exposes only
//!    readers, so immutability needs no runtime interception.
//!
//! 3. **One source of truth for field state.** Named accessors and
//!    key-style indexing read the same declaration-ordered mapping.
//!
//! 4. **Injected non-determinism.** The clock and identifier generator
//!    are capability traits carried by `Environment`; deterministic
//!    substitutes drop in without touching global state.
//!
//! 5. **Exact error text.** Construction failures render fixed message
//!    strings that are part of the compatibility contract.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests (indexing a record with
//!   a missing key is the documented exception).

pub mod env;
pub mod error;
pub mod property;
pub mod record;
pub mod schema;
pub mod sdo;
pub mod serialize;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use env::{Clock, Environment, FixedClock, FixedIds, IdGenerator, RandomIds, SystemClock};
pub use error::ObjectError;
pub use property::{PropertyDescriptor, ResolveContext, ValueKind};
pub use record::{Properties, Record};
pub use schema::{Registry, Schema};
pub use value::PropertyValue;
