//! Compiling the JSON rule grammar
//!
//! A rule document is a JSON object mapping each field to its rule list.
//! Each entry in the list takes one of three shapes:
//!
//! - `"required"` — bare reference, no arguments, default message;
//! - `["range", 0, 120, {"message": "out of bounds"}]` — reference followed
//!   by positional arguments; object elements carry named options;
//! - `{"check": "range", "args": [0, 120], "message": "..."}` — fully keyed.
//!
//! As a convenience, a field may map to a single bare reference instead of
//! a list: `{"name": "required"}`.
//!
//! Named options are `message` and `error` (failure-text override, checked
//! in that priority order) and `if` (name of a skip predicate). Anything
//! else is a [`ConfigError::UnknownOption`].
//!
//! Every reference is resolved here, against the alias table first and then
//! the registries, so that a malformed document fails at
//! [`set_rules`](crate::engine::RuleEngine::set_rules) rather than somewhere
//! in the middle of a validation pass.

use serde_json::{Map, Value};

use crate::core::{ConfigError, json_type_name};
use crate::registry::{CheckerRegistry, ConditionRegistry};

use super::aliases::AliasTable;
use super::spec::{Condition, RuleSet, RuleSpec};

/// Named options a rule entry may carry.
#[derive(Debug, Default)]
struct Options {
    message: Option<String>,
    error: Option<String>,
    predicate: Option<String>,
}

impl Options {
    fn set(&mut self, field: &str, key: &str, value: &Value) -> Result<(), ConfigError> {
        let slot = match key {
            "message" => &mut self.message,
            "error" => &mut self.error,
            "if" => &mut self.predicate,
            other => {
                return Err(ConfigError::UnknownOption {
                    field: field.to_string(),
                    key: other.to_string(),
                });
            }
        };
        match value.as_str() {
            Some(text) => {
                *slot = Some(text.to_string());
                Ok(())
            }
            None => Err(ConfigError::MalformedRule {
                field: field.to_string(),
                reason: format!("option `{key}` must be a string"),
            }),
        }
    }

    fn merge(&mut self, field: &str, map: &Map<String, Value>) -> Result<(), ConfigError> {
        for (key, value) in map {
            self.set(field, key, value)?;
        }
        Ok(())
    }

    /// `message` wins over `error` when both are present.
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Compiles a raw rule document against the given tables.
pub(crate) fn compile(
    doc: &Value,
    aliases: &AliasTable,
    checkers: &CheckerRegistry,
    conditions: &ConditionRegistry,
) -> Result<RuleSet, ConfigError> {
    let Value::Object(fields) = doc else {
        return Err(ConfigError::RulesNotObject {
            found: json_type_name(doc),
        });
    };

    let mut set = RuleSet::new();
    for (field, entries) in fields {
        let list = match entries {
            Value::String(name) => {
                vec![build(field, name, Vec::new(), Options::default(), aliases, checkers, conditions)?]
            }
            Value::Array(items) => items
                .iter()
                .map(|entry| parse_entry(field, entry, aliases, checkers, conditions))
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(ConfigError::MalformedRule {
                    field: field.clone(),
                    reason: format!(
                        "rules must be an array of entries, got {}",
                        json_type_name(other)
                    ),
                });
            }
        };
        set.insert(field.clone(), list);
    }
    Ok(set)
}

fn parse_entry(
    field: &str,
    entry: &Value,
    aliases: &AliasTable,
    checkers: &CheckerRegistry,
    conditions: &ConditionRegistry,
) -> Result<RuleSpec, ConfigError> {
    match entry {
        Value::String(name) => {
            build(field, name, Vec::new(), Options::default(), aliases, checkers, conditions)
        }
        Value::Array(items) => {
            let Some(first) = items.first() else {
                return Err(ConfigError::MalformedRule {
                    field: field.to_string(),
                    reason: "empty rule entry".to_string(),
                });
            };
            let Some(name) = first.as_str() else {
                return Err(ConfigError::MalformedRule {
                    field: field.to_string(),
                    reason: format!(
                        "rule reference must be a string, got {}",
                        json_type_name(first)
                    ),
                });
            };

            let mut args = Vec::new();
            let mut options = Options::default();
            for item in &items[1..] {
                match item {
                    Value::Object(map) => options.merge(field, map)?,
                    other => args.push(other.clone()),
                }
            }
            build(field, name, args, options, aliases, checkers, conditions)
        }
        Value::Object(map) => {
            let mut check: Option<&str> = None;
            let mut args = Vec::new();
            let mut options = Options::default();
            for (key, value) in map {
                match key.as_str() {
                    "check" => {
                        check = Some(value.as_str().ok_or_else(|| ConfigError::MalformedRule {
                            field: field.to_string(),
                            reason: "`check` must be a string".to_string(),
                        })?);
                    }
                    "args" => {
                        let items = value.as_array().ok_or_else(|| ConfigError::MalformedRule {
                            field: field.to_string(),
                            reason: "`args` must be an array".to_string(),
                        })?;
                        args = items.clone();
                    }
                    _ => options.set(field, key, value)?,
                }
            }
            let Some(name) = check else {
                return Err(ConfigError::MalformedRule {
                    field: field.to_string(),
                    reason: "object rule entry requires a `check` key".to_string(),
                });
            };
            build(field, name, args, options, aliases, checkers, conditions)
        }
        other => Err(ConfigError::MalformedRule {
            field: field.to_string(),
            reason: format!(
                "rule entry must be a string, array, or object, got {}",
                json_type_name(other)
            ),
        }),
    }
}

fn build(
    field: &str,
    name: &str,
    doc_args: Vec<Value>,
    options: Options,
    aliases: &AliasTable,
    checkers: &CheckerRegistry,
    conditions: &ConditionRegistry,
) -> Result<RuleSpec, ConfigError> {
    let (reference, mut args) = aliases.expand(name, field)?;
    args.extend(doc_args);

    let condition = if let Some((checker, method)) = reference.split_once(':') {
        let Some(entry) = checkers.get(checker) else {
            return Err(ConfigError::UnknownChecker {
                field: field.to_string(),
                checker: checker.to_string(),
                reference: reference.clone(),
            });
        };
        if !entry.has_method(method) {
            return Err(ConfigError::UnknownMethod {
                field: field.to_string(),
                checker: checker.to_string(),
                method: method.to_string(),
            });
        }
        Condition::checker(checker, method)
    } else if conditions.contains_fn(&reference) {
        Condition::Named(reference.clone())
    } else {
        return Err(ConfigError::UnknownCondition {
            field: field.to_string(),
            name: reference,
        });
    };

    if let Some(predicate) = &options.predicate {
        if !conditions.contains_predicate(predicate) {
            return Err(ConfigError::UnknownPredicate {
                field: field.to_string(),
                name: predicate.clone(),
            });
        }
    }

    let mut spec = RuleSpec::new(name, condition).with_args(args);
    if let Some(predicate) = options.predicate.clone() {
        spec = spec.when(predicate);
    }
    if let Some(message) = options.into_message() {
        spec = spec.with_message(message);
    }
    Ok(spec)
}
