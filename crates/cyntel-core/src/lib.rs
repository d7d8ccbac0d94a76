//! # cyntel-core — Foundational Types for CYNTEL
//!
//! Leaf crate of the CYNTEL workspace. Defines the primitives the object
//! model is built on: UTC-only timestamps, STIX-style object identifiers,
//! canonical byte production, and content digests. Every other crate in
//! the workspace depends on `cyntel-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** The `Timestamp` type carries UTC instants
//!    truncated to whole seconds and renders them as `YYYY-MM-DDTHH:MM:SSZ`.
//!    Input with any offset is converted to UTC at the boundary, so a given
//!    instant has exactly one textual form.
//!
//! 2. **Validated identifier newtype.** `Identifier` holds a
//!    `<object-type>--<uuid>` pair with a validated constructor. No bare
//!    strings for object references.
//!
//! 3. **`CanonicalBytes` newtype.** All digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!
//! 4. **`sha256_digest()` accepts only `&CanonicalBytes`.** The signature
//!    enforces that every digest path goes through canonicalization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cyntel-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CoreError};
pub use identity::Identifier;
pub use temporal::Timestamp;
