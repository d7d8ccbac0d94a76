//! # cyntel-cli — CYNTEL Command-Line Interface
//!
//! Thin glue over the object-modeling crates. Handlers parse input,
//! delegate to `cyntel-objects`, and print results — no business logic
//! lives here.
//!
//! ## Subcommands
//!
//! - `create` — construct an object from name=value properties and
//!   print its canonical JSON
//! - `validate` — run a JSON document through schema validation
//! - `digest` — print the content digest of a validated document

pub mod create;
pub mod digest;
pub mod document;
pub mod validate;
