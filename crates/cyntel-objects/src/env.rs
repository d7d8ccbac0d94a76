//! # Injectable Capabilities — Clock and Identifier Generation
//!
//! The only two sources of non-determinism in record construction are
//! the current time (default `created`, `modified`, `valid_from`) and
//! fresh identifiers (default `id`). Both are modeled as explicit
//! capability traits threaded into construction through `Environment`
//! rather than as hidden global state, so deterministic substitutes can
//! be supplied without patching anything process-wide.

use std::sync::Arc;

use cyntel_core::Timestamp;
use uuid::Uuid;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// The current instant, truncated to whole seconds.
    fn now(&self) -> Timestamp;
}

/// Source of fresh globally-unique identifier tokens.
pub trait IdGenerator: Send + Sync {
    /// A fresh UUID.
    fn generate(&self) -> Uuid;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Random (version 4) UUID generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// A clock pinned to one instant. Every call returns the same value, so
/// construction under a `FixedClock` is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// An identifier source pinned to one UUID. Pure: no hidden counter, so
/// repeated construction yields identical records.
#[derive(Debug, Clone, Copy)]
pub struct FixedIds(pub Uuid);

impl IdGenerator for FixedIds {
    fn generate(&self) -> Uuid {
        self.0
    }
}

/// The capability bundle construction runs against.
#[derive(Clone)]
pub struct Environment {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Environment {
    /// Build an environment from explicit capabilities.
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// A fully deterministic environment: fixed clock, fixed identifier.
    pub fn fixed(now: Timestamp, id: Uuid) -> Self {
        Self::new(Arc::new(FixedClock(now)), Arc::new(FixedIds(id)))
    }

    /// The clock capability.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The identifier-generation capability.
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIds))
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
