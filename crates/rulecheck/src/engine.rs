//! The rule engine
//!
//! [`RuleEngine`] owns the data under validation, the compiled rule set,
//! and the error state, and evaluates lazily: nothing runs until
//! [`is_valid`](RuleEngine::is_valid) or [`errors`](RuleEngine::errors) is
//! called, and repeated calls reuse the computed result until data or rules
//! actually change.
//!
//! # Quick start
//!
//! ```
//! use rulecheck::engine::RuleEngine;
//! use serde_json::json;
//!
//! let mut engine = RuleEngine::new();
//! engine
//!     .set_rules(json!({
//!         "email": [["required"], ["email"]],
//!         "age": [["integer"], ["range", 0, 120]],
//!     }))
//!     .unwrap()
//!     .set_data(json!({"email": "user@example.com", "age": 150}));
//!
//! assert!(!engine.is_valid().unwrap());
//! let errors = engine.errors().unwrap();
//! assert!(errors.contains_key("age"));
//! assert!(!errors.contains_key("email"));
//! ```
//!
//! One engine serves one logical validation subject; construct a fresh one
//! per operation (cheap — registries are shared behind `Arc`) rather than
//! sharing an instance across threads.

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::context::{Context, DataSource};
use crate::core::{CheckError, ConfigError, Outcome, is_empty_value, render_value};
use crate::interpolate::interpolate;
use crate::registry::{CheckerRegistry, ConditionFn, ConditionRegistry, Predicate, Scope};
use crate::rules::aliases::AliasTable;
use crate::rules::parse;
use crate::rules::spec::{Condition, RuleSet, RuleSpec};

/// Message used when neither the rule nor the checker supplies one.
pub const DEFAULT_MESSAGE: &str = "Condition `{condition}` was not satisfied";

// ============================================================================
// EMPTY-SKIP POLICY
// ============================================================================

/// Decides which rules still apply when a field's value is empty.
///
/// When a value is empty (absent, null, `""`, `[]`, `{}`), the engine skips
/// the field's remaining rules — except for rules this policy exempts,
/// which run precisely *because* the value is missing. The standard policy
/// exempts presence checks; [`EmptyPolicy::custom`] swaps in any predicate
/// over the rule.
#[derive(Clone)]
pub struct EmptyPolicy {
    exempt: Arc<dyn Fn(&RuleSpec) -> bool + Send + Sync>,
}

/// Rule names the standard policy treats as presence checks.
const PRESENCE_NAMES: &[&str] = &["required", "notEmpty", "notNull", "filled"];

impl EmptyPolicy {
    /// Exempts presence checks: rules named `required` / `notEmpty` /
    /// `notNull` / `filled`, and rules resolving to `type:notEmpty` or
    /// `type:notNull`.
    #[must_use]
    pub fn standard() -> Self {
        Self::custom(|rule| {
            if PRESENCE_NAMES.contains(&rule.name()) {
                return true;
            }
            matches!(
                rule.condition(),
                Condition::Checker { checker, method }
                    if checker == "type" && (method == "notEmpty" || method == "notNull")
            )
        })
    }

    /// Builds a policy from an arbitrary predicate. Returning `true` means
    /// the rule runs against empty values.
    pub fn custom<F>(exempt: F) -> Self
    where
        F: Fn(&RuleSpec) -> bool + Send + Sync + 'static,
    {
        Self {
            exempt: Arc::new(exempt),
        }
    }

    pub(crate) fn applies_to_empty(&self, rule: &RuleSpec) -> bool {
        (self.exempt)(rule)
    }
}

impl Default for EmptyPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for EmptyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EmptyPolicy(..)")
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Rule-driven validator for one logical subject.
///
/// See the [module docs](self) for the full walkthrough.
#[derive(Debug)]
pub struct RuleEngine {
    checkers: Arc<CheckerRegistry>,
    conditions: Arc<ConditionRegistry>,
    aliases: AliasTable,
    empty_policy: EmptyPolicy,
    rules_doc: Value,
    rules: RuleSet,
    data: Context,
    context: Value,
    errors: IndexMap<String, String>,
    registered: IndexMap<String, String>,
    validated: bool,
}

impl RuleEngine {
    /// Engine with the standard registries, aliases, and empty-skip policy,
    /// and no rules or data yet.
    #[must_use]
    pub fn new() -> Self {
        RuleEngineBuilder::default().assemble().0
    }

    /// Starts a builder for custom wiring.
    #[must_use]
    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::default()
    }

    // ── rules ────────────────────────────────────────────────────────────

    /// Assigns the rule document, compiling it immediately.
    ///
    /// A document deep-equal to the current one is a no-op that preserves
    /// computed errors; a genuinely new document replaces the compiled set
    /// and clears computed (not registered) errors. Malformed documents are
    /// rejected without touching current state.
    pub fn set_rules(&mut self, doc: Value) -> Result<&mut Self, ConfigError> {
        if doc == self.rules_doc {
            return Ok(self);
        }
        let compiled = parse::compile(&doc, &self.aliases, &self.checkers, &self.conditions)?;
        self.rules = compiled;
        self.rules_doc = doc;
        self.invalidate();
        Ok(self)
    }

    /// Assigns an already-compiled rule set, e.g. one carrying
    /// [`Condition::Callable`] entries that have no document form.
    ///
    /// Always replaces: compiled sets cannot be compared for equality, so
    /// there is no no-op short-circuit on this path.
    pub fn set_rule_set(&mut self, rules: RuleSet) -> &mut Self {
        self.rules = rules;
        self.rules_doc = Value::Null;
        self.invalidate();
        self
    }

    /// The compiled rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    // ── data and context ─────────────────────────────────────────────────

    /// Assigns the data under validation, normalized through
    /// [`DataSource`]. Equal data is a no-op that preserves computed
    /// errors.
    pub fn set_data(&mut self, source: impl DataSource) -> &mut Self {
        let data = source.into_context();
        if data == self.data {
            return self;
        }
        self.data = data;
        self.invalidate();
        self
    }

    /// The current data.
    #[must_use]
    pub fn data(&self) -> &Context {
        &self.data
    }

    /// Unwrapped value of a field, if present.
    #[must_use]
    pub fn value_of(&self, field: &str) -> Option<Value> {
        self.data.get(field)
    }

    /// Unwrapped value of a field, or `default` if absent.
    #[must_use]
    pub fn value_or(&self, field: &str, default: Value) -> Value {
        self.data.get_or(field, default)
    }

    /// Sets the free-form context payload skip predicates can consult.
    /// Equal payloads are a no-op.
    pub fn set_context(&mut self, context: Value) -> &mut Self {
        if context == self.context {
            return self;
        }
        self.context = context;
        self.invalidate();
        self
    }

    /// The free-form context payload.
    #[must_use]
    pub fn context(&self) -> &Value {
        &self.context
    }

    // ── externally injected errors ───────────────────────────────────────

    /// Records an error produced outside rule evaluation (say, a
    /// uniqueness check done by a collaborator with database access).
    /// Registered errors win over rule-produced errors for the same field
    /// and survive `set_rules` / `set_data`.
    pub fn register_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.registered.insert(field.into(), message.into());
        self
    }

    /// Drops all registered errors.
    pub fn flush_registered(&mut self) -> &mut Self {
        self.registered.clear();
        self
    }

    /// The registered (externally injected) errors only.
    #[must_use]
    pub fn registered_errors(&self) -> &IndexMap<String, String> {
        &self.registered
    }

    // ── verdicts ─────────────────────────────────────────────────────────

    /// Runs validation if needed; true iff no rule failed and no error was
    /// registered.
    pub fn is_valid(&mut self) -> Result<bool, ConfigError> {
        self.ensure_validated()?;
        Ok(self.errors.is_empty() && self.registered.is_empty())
    }

    /// Runs validation if needed; returns registered errors merged over
    /// computed ones (registered wins on collision).
    pub fn errors(&mut self) -> Result<IndexMap<String, String>, ConfigError> {
        self.ensure_validated()?;
        let mut merged = self.errors.clone();
        for (field, message) in &self.registered {
            merged.insert(field.clone(), message.clone());
        }
        Ok(merged)
    }

    // ── internals ────────────────────────────────────────────────────────

    fn invalidate(&mut self) {
        self.errors.clear();
        self.validated = false;
    }

    fn ensure_validated(&mut self) -> Result<(), ConfigError> {
        if self.validated {
            return Ok(());
        }
        self.errors = self.run_validation()?;
        self.validated = true;
        Ok(())
    }

    /// One full pass over the rule set. Pure with respect to engine state:
    /// reads data/rules/registries, produces the computed error map.
    fn run_validation(&self) -> Result<IndexMap<String, String>, ConfigError> {
        let mut errors: IndexMap<String, String> = IndexMap::new();

        for (field, rules) in self.rules.iter() {
            for rule in rules {
                if errors.contains_key(field) {
                    break;
                }
                let value = self.data.get_or(field, Value::Null);
                if is_empty_value(&value) && !self.empty_policy.applies_to_empty(rule) {
                    break;
                }
                if let Some(name) = rule.predicate() {
                    if !self.predicate(field, name)?.is_met(&Scope {
                        data: &self.data,
                        context: &self.context,
                    }) {
                        continue;
                    }
                }
                match self.evaluate(field, &value, rule)? {
                    Outcome::Pass => {}
                    Outcome::Halt => break,
                    Outcome::Fail(message) => {
                        errors.insert(
                            field.to_string(),
                            self.compose_message(rule, message, field, &value),
                        );
                    }
                }
            }
        }
        Ok(errors)
    }

    fn predicate(&self, field: &str, name: &str) -> Result<&Arc<dyn Predicate>, ConfigError> {
        self.conditions
            .predicate(name)
            .ok_or_else(|| ConfigError::UnknownPredicate {
                field: field.to_string(),
                name: name.to_string(),
            })
    }

    /// Evaluates one rule. Configuration problems (unresolvable references)
    /// are fatal; errors raised by the check itself are logged and degraded
    /// to a plain failure so one buggy check cannot sink the pass.
    fn evaluate(
        &self,
        field: &str,
        value: &Value,
        rule: &RuleSpec,
    ) -> Result<Outcome, ConfigError> {
        match rule.condition() {
            Condition::Checker { checker, method } => {
                let entry =
                    self.checkers
                        .get(checker)
                        .ok_or_else(|| ConfigError::UnknownChecker {
                            field: field.to_string(),
                            checker: checker.clone(),
                            reference: rule.name().to_string(),
                        })?;
                match entry.check(method, value, rule.args()) {
                    Ok(Outcome::Fail(None)) => Ok(Outcome::Fail(entry.message_for(method))),
                    Ok(outcome) => Ok(outcome),
                    Err(CheckError::UnsupportedMethod { method }) => {
                        Err(ConfigError::UnknownMethod {
                            field: field.to_string(),
                            checker: checker.clone(),
                            method,
                        })
                    }
                    Err(error) => {
                        tracing::warn!(
                            field = %field,
                            condition = %rule.name(),
                            %error,
                            "check raised while evaluating; treating as failed"
                        );
                        Ok(Outcome::Fail(None))
                    }
                }
            }
            Condition::Named(name) => {
                let function =
                    self.conditions
                        .function(name)
                        .ok_or_else(|| ConfigError::UnknownCondition {
                            field: field.to_string(),
                            name: name.clone(),
                        })?;
                Ok(Self::run_callable(function, field, rule, value))
            }
            Condition::Callable(function) => Ok(Self::run_callable(function, field, rule, value)),
        }
    }

    fn run_callable(function: &ConditionFn, field: &str, rule: &RuleSpec, value: &Value) -> Outcome {
        match function(value, rule.args()) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(
                    field = %field,
                    condition = %rule.name(),
                    %error,
                    "condition raised while evaluating; treating as failed"
                );
                Outcome::Fail(None)
            }
        }
    }

    /// Picks the failure text (rule override → check-supplied → default)
    /// and interpolates it.
    fn compose_message(
        &self,
        rule: &RuleSpec,
        check_message: Option<Cow<'static, str>>,
        field: &str,
        value: &Value,
    ) -> String {
        let template = rule
            .message()
            .map(str::to_string)
            .or_else(|| check_message.map(Cow::into_owned))
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

        let mut vars: Vec<(String, String)> = vec![
            ("field".to_string(), field.to_string()),
            ("condition".to_string(), rule.name().to_string()),
            ("value".to_string(), render_value(value)),
        ];
        for (index, arg) in rule.args().iter().enumerate() {
            vars.push((index.to_string(), render_value(arg)));
        }
        interpolate(&template, &vars)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Wires registries, aliases, the empty-skip policy, and optional seed
/// rules/data into a [`RuleEngine`].
///
/// # Examples
///
/// ```
/// use rulecheck::engine::RuleEngine;
/// use serde_json::json;
///
/// let mut engine = RuleEngine::builder()
///     .alias_with_args("positive", "range", vec![json!(1), json!(null)])
///     .rules(json!({"x": ["positive"]}))
///     .data(json!({"x": -5}))
///     .build()
///     .unwrap();
/// assert!(!engine.is_valid().unwrap());
/// ```
#[derive(Debug)]
pub struct RuleEngineBuilder {
    checkers: CheckerRegistry,
    conditions: ConditionRegistry,
    aliases: AliasTable,
    empty_policy: EmptyPolicy,
    rules: Option<Value>,
    data: Option<Context>,
    context: Option<Value>,
}

impl Default for RuleEngineBuilder {
    fn default() -> Self {
        Self {
            checkers: CheckerRegistry::standard(),
            conditions: ConditionRegistry::new(),
            aliases: AliasTable::standard(),
            empty_policy: EmptyPolicy::standard(),
            rules: None,
            data: None,
            context: None,
        }
    }
}

impl RuleEngineBuilder {
    /// Registers an additional checker.
    #[must_use]
    pub fn checker(
        mut self,
        name: impl Into<String>,
        checker: impl crate::checkers::Checker + 'static,
    ) -> Self {
        self.checkers.register(name, checker);
        self
    }

    /// Registers a named condition function.
    #[must_use]
    pub fn condition_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        self.conditions.register_fn(name, f);
        self
    }

    /// Registers a named skip predicate.
    #[must_use]
    pub fn predicate(
        mut self,
        name: impl Into<String>,
        predicate: impl Predicate + 'static,
    ) -> Self {
        self.conditions.register_predicate(name, predicate);
        self
    }

    /// Adds an alias on top of the standard table.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.aliases.alias(name, reference);
        self
    }

    /// Adds an argument-binding alias on top of the standard table.
    #[must_use]
    pub fn alias_with_args(
        mut self,
        name: impl Into<String>,
        reference: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        self.aliases.alias_with_args(name, reference, args);
        self
    }

    /// Replaces the checker registry wholesale.
    #[must_use]
    pub fn checkers(mut self, registry: CheckerRegistry) -> Self {
        self.checkers = registry;
        self
    }

    /// Replaces the condition registry wholesale.
    #[must_use]
    pub fn conditions(mut self, registry: ConditionRegistry) -> Self {
        self.conditions = registry;
        self
    }

    /// Replaces the alias table wholesale.
    #[must_use]
    pub fn aliases(mut self, table: AliasTable) -> Self {
        self.aliases = table;
        self
    }

    /// Replaces the empty-skip policy.
    #[must_use]
    pub fn empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Seeds the initial rule document, compiled by [`build`](Self::build).
    #[must_use]
    pub fn rules(mut self, doc: Value) -> Self {
        self.rules = Some(doc);
        self
    }

    /// Seeds the initial data.
    #[must_use]
    pub fn data(mut self, source: impl DataSource) -> Self {
        self.data = Some(source.into_context());
        self
    }

    /// Seeds the free-form context payload.
    #[must_use]
    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Builds the engine, compiling any seeded rules so malformed
    /// documents fail here rather than on first use.
    pub fn build(self) -> Result<RuleEngine, ConfigError> {
        let (mut engine, rules) = self.assemble();
        if let Some(doc) = rules {
            engine.set_rules(doc)?;
        }
        Ok(engine)
    }

    /// Splits the builder into an engine without rules plus the seeded
    /// document. Infallible half of [`build`](Self::build).
    pub(crate) fn assemble(self) -> (RuleEngine, Option<Value>) {
        let engine = RuleEngine {
            checkers: Arc::new(self.checkers),
            conditions: Arc::new(self.conditions),
            aliases: self.aliases,
            empty_policy: self.empty_policy,
            rules_doc: Value::Null,
            rules: RuleSet::new(),
            data: self.data.unwrap_or_default(),
            context: self.context.unwrap_or(Value::Null),
            errors: IndexMap::new(),
            registered: IndexMap::new(),
            validated: false,
        };
        (engine, self.rules)
    }
}
