//! Compiled rule sets
//!
//! The compiled form the engine actually evaluates. Conditions are a closed
//! tagged union: either a `checker:method` pair, a name resolved in the
//! condition registry, or a function value supplied programmatically. No
//! string parsing survives past compilation.

use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::core::{CheckError, Outcome};
use crate::registry::ConditionFn;

/// Rule argument list. Most rules carry zero to two arguments.
pub type Args = SmallVec<[Value; 2]>;

// ============================================================================
// CONDITIONS
// ============================================================================

/// What a rule's reference resolved to.
#[derive(Clone)]
pub enum Condition {
    /// Delegates to a method of a registered checker.
    Checker {
        /// Short name of the checker in the registry.
        checker: String,
        /// Method within the checker's family.
        method: String,
    },
    /// A condition function registered by name.
    Named(String),
    /// A function value, only constructible programmatically.
    Callable(ConditionFn),
}

impl Condition {
    /// Wraps a closure as a directly invocable condition.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    /// Builds a `checker:method` condition.
    pub fn checker(checker: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Checker {
            checker: checker.into(),
            method: method.into(),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checker { checker, method } => write!(f, "Checker({checker}:{method})"),
            Self::Named(name) => write!(f, "Named({name})"),
            Self::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

// ============================================================================
// RULE SPECS
// ============================================================================

/// One compiled rule: a condition, its arguments, and the per-rule options.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    name: String,
    condition: Condition,
    args: Args,
    message: Option<String>,
    predicate: Option<String>,
}

impl RuleSpec {
    /// Creates a rule. `name` is the reference as written in the document;
    /// it feeds the `{condition}` placeholder and the empty-skip policy.
    pub fn new(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            condition,
            args: Args::new(),
            message: None,
            predicate: None,
        }
    }

    /// Sets the argument list.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Sets the failure-message override.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Guards the rule behind a named skip predicate.
    #[must_use]
    pub fn when(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// The reference as written in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled condition.
    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Arguments passed to the condition after the value.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Failure-message override, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Name of the guarding skip predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }
}

// ============================================================================
// RULE SETS
// ============================================================================

/// Ordered field → rule-list mapping.
///
/// Field iteration order is insertion order; rules within a field are
/// evaluated in declared order and stop at the first failure.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: indexmap::IndexMap<String, Vec<RuleSpec>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the rule list for a field, replacing any previous list.
    pub fn insert(&mut self, field: impl Into<String>, rules: Vec<RuleSpec>) -> &mut Self {
        self.fields.insert(field.into(), rules);
        self
    }

    /// Rules declared for a field.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[RuleSpec]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleSpec])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of fields with rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
