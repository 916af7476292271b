//! Explicit lookup tables for checkers, condition functions, and predicates
//!
//! All name resolution the engine performs goes through these registries,
//! wired at construction time. There is no ambient container and no runtime
//! type resolution: a reference that does not resolve against a registry is
//! a [`ConfigError`](crate::core::ConfigError) when the rule set compiles.
//!
//! # Examples
//!
//! ```
//! use rulecheck::registry::ConditionRegistry;
//! use rulecheck::core::Outcome;
//!
//! let mut conditions = ConditionRegistry::new();
//! conditions.register_fn("even", |value, _args| {
//!     Ok(Outcome::from(value.as_i64().is_some_and(|n| n % 2 == 0)))
//! });
//! assert!(conditions.contains_fn("even"));
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::checkers::Checker;
use crate::context::Context;
use crate::core::{CheckError, Outcome};

// ============================================================================
// CHECKER REGISTRY
// ============================================================================

/// Short name → checker implementation.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    entries: IndexMap<String, Arc<dyn Checker>>,
}

impl CheckerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-loaded with the built-in checkers:
    /// `type`, `number`, `string`, and `address`.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register("type", crate::checkers::TypeChecker)
            .register("number", crate::checkers::NumberChecker)
            .register("string", crate::checkers::StringChecker)
            .register("address", crate::checkers::AddressChecker::new());
        registry
    }

    /// Registers a checker under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        checker: impl Checker + 'static,
    ) -> &mut Self {
        self.entries.insert(name.into(), Arc::new(checker));
        self
    }

    /// Looks up a checker by short name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Checker>> {
        self.entries.get(name)
    }

    /// True if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered checker names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// CONDITION FUNCTIONS AND SKIP PREDICATES
// ============================================================================

/// A directly invocable condition: `(value, args) -> Outcome`.
pub type ConditionFn =
    Arc<dyn Fn(&Value, &[Value]) -> Result<Outcome, CheckError> + Send + Sync>;

/// What a skip predicate sees: the data under validation plus the engine's
/// free-form context payload. Deliberately independent of any single field
/// value — predicates decide whether a rule applies at all.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// The data under validation.
    pub data: &'a Context,
    /// The engine's free-form context payload.
    pub context: &'a Value,
}

impl Scope<'_> {
    /// Unwrapped value of a field, if present.
    #[must_use]
    pub fn value_of(&self, field: &str) -> Option<Value> {
        self.data.get(field)
    }

    /// True if the field is present in the data.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.data.contains(field)
    }
}

/// Gate deciding whether a single rule applies given the current scope.
pub trait Predicate: Send + Sync {
    /// True if the guarded rule should be evaluated.
    fn is_met(&self, scope: &Scope<'_>) -> bool;
}

impl<F> Predicate for F
where
    F: for<'a> Fn(&Scope<'a>) -> bool + Send + Sync,
{
    fn is_met(&self, scope: &Scope<'_>) -> bool {
        self(scope)
    }
}

/// Named condition functions and named skip predicates.
///
/// Condition functions are the pre-registered replacement for resolving
/// arbitrary callables by name at validation time; predicates back the
/// `if` option of a rule.
#[derive(Clone, Default)]
pub struct ConditionRegistry {
    functions: IndexMap<String, ConditionFn>,
    predicates: IndexMap<String, Arc<dyn Predicate>>,
}

impl ConditionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a condition function under `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
        self
    }

    /// Registers a skip predicate under `name`.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: impl Predicate + 'static,
    ) -> &mut Self {
        self.predicates.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Looks up a condition function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&ConditionFn> {
        self.functions.get(name)
    }

    /// Looks up a skip predicate.
    #[must_use]
    pub fn predicate(&self, name: &str) -> Option<&Arc<dyn Predicate>> {
        self.predicates.get(name)
    }

    /// True if a condition function is registered under `name`.
    #[must_use]
    pub fn contains_fn(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// True if a skip predicate is registered under `name`.
    #[must_use]
    pub fn contains_predicate(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("predicates", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}
