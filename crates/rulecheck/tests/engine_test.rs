use pretty_assertions::assert_eq;
use rulecheck::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn engine_with(rules: Value, data: Value) -> RuleEngine {
    let mut engine = RuleEngine::new();
    engine.set_rules(rules).unwrap().set_data(data);
    engine
}

// ============================================================================
// VERDICTS
// ============================================================================

#[test]
fn valid_data_has_no_errors() {
    let mut engine = engine_with(
        json!({
            "email": [["required"], ["email"]],
            "age": [["integer"], ["range", 0, 120]],
        }),
        json!({"email": "user@example.com", "age": 34}),
    );
    assert!(engine.is_valid().unwrap());
    assert!(engine.errors().unwrap().is_empty());
}

#[test]
fn integer_passes_then_range_fails() {
    let mut engine = engine_with(
        json!({"age": [["integer"], ["range", 0, 120]]}),
        json!({"age": 150}),
    );
    assert!(!engine.is_valid().unwrap());
    let errors = engine.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["age"], "Must be in range 0..120");
}

#[test]
fn first_failing_rule_wins() {
    let mut engine = engine_with(
        json!({"name": [
            ["longer", 5, {"message": "too short"}],
            ["regexp", "^[a-z]+$", {"message": "bad charset"}],
        ]}),
        json!({"name": "Ab1"}),
    );
    let errors = engine.errors().unwrap();
    assert_eq!(errors["name"], "too short");
}

#[test]
fn error_map_follows_rule_declaration_order() {
    let mut engine = engine_with(
        json!({
            "b": [["integer"]],
            "a": [["integer"]],
        }),
        json!({"b": "x", "a": "y"}),
    );
    let errors = engine.errors().unwrap();
    let fields: Vec<&String> = errors.keys().collect();
    assert_eq!(fields, vec!["b", "a"]);
}

#[test]
fn errors_are_idempotent() {
    let mut engine = engine_with(
        json!({"age": [["range", 0, 120]]}),
        json!({"age": 150}),
    );
    let first = engine.errors().unwrap();
    let second = engine.errors().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

// ============================================================================
// EMPTY VALUES
// ============================================================================

#[test]
fn empty_value_runs_only_presence_rules() {
    let mut engine = engine_with(
        json!({"email": [["required"], ["email"]]}),
        json!({"email": ""}),
    );
    let errors = engine.errors().unwrap();
    assert_eq!(errors.len(), 1);
    // The email check never ran: the message is the presence check's.
    assert_eq!(errors["email"], "This value is required");
}

#[test]
fn missing_field_behaves_like_empty() {
    let mut engine = engine_with(json!({"email": [["required"], ["email"]]}), json!({}));
    assert_eq!(engine.errors().unwrap()["email"], "This value is required");
}

#[test]
fn empty_value_without_presence_rules_is_valid() {
    let mut engine = engine_with(json!({"email": [["email"]]}), json!({"email": ""}));
    assert!(engine.is_valid().unwrap());
}

#[test]
fn custom_empty_policy_can_run_everything() {
    let mut engine = RuleEngine::builder()
        .empty_policy(EmptyPolicy::custom(|_| true))
        .rules(json!({"email": [["email"]]}))
        .data(json!({"email": ""}))
        .build()
        .unwrap();
    assert_eq!(engine.errors().unwrap()["email"], "Must be a valid email address");
}

// ============================================================================
// SETTER NO-OPS AND INVALIDATION
// ============================================================================

#[test]
fn setting_identical_data_does_not_revalidate() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);
    let mut engine = RuleEngine::builder()
        .condition_fn("counted", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Pass)
        })
        .rules(json!({"x": ["counted"]}))
        .data(json!({"x": 1}))
        .build()
        .unwrap();

    assert!(engine.is_valid().unwrap());
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);

    engine.set_data(json!({"x": 1}));
    assert!(engine.is_valid().unwrap());
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);

    engine.set_data(json!({"x": 2}));
    assert!(engine.is_valid().unwrap());
    assert_eq!(evaluations.load(Ordering::SeqCst), 2);
}

#[test]
fn setting_identical_rules_does_not_revalidate() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);
    let doc = json!({"x": ["counted"]});
    let mut engine = RuleEngine::builder()
        .condition_fn("counted", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Pass)
        })
        .rules(doc.clone())
        .data(json!({"x": 1}))
        .build()
        .unwrap();

    assert!(engine.is_valid().unwrap());
    engine.set_rules(doc).unwrap();
    assert!(engine.is_valid().unwrap());
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
}

#[test]
fn new_rules_clear_computed_errors() {
    let mut engine = engine_with(json!({"age": [["range", 0, 120]]}), json!({"age": 150}));
    assert!(!engine.is_valid().unwrap());

    engine.set_rules(json!({"age": [["integer"]]})).unwrap();
    assert!(engine.is_valid().unwrap());
}

// ============================================================================
// REGISTERED ERRORS
// ============================================================================

#[test]
fn registered_error_forces_invalid() {
    let mut engine = engine_with(json!({}), json!({}));
    engine.register_error("x", "boom");
    assert!(!engine.is_valid().unwrap());
    assert_eq!(engine.errors().unwrap()["x"], "boom");
}

#[test]
fn registered_error_overrides_rule_error() {
    let mut engine = engine_with(json!({"age": [["range", 0, 120]]}), json!({"age": 150}));
    engine.register_error("age", "already taken");
    assert_eq!(engine.errors().unwrap()["age"], "already taken");
}

#[test]
fn registered_errors_survive_rule_changes() {
    let mut engine = engine_with(json!({"age": [["range", 0, 120]]}), json!({"age": 150}));
    engine.register_error("name", "duplicate");
    engine.set_rules(json!({"age": [["integer"]]})).unwrap();
    let errors = engine.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["name"], "duplicate");
}

#[test]
fn flush_registered_restores_validity() {
    let mut engine = engine_with(json!({}), json!({}));
    engine.register_error("x", "boom");
    assert!(!engine.is_valid().unwrap());
    engine.flush_registered();
    assert!(engine.is_valid().unwrap());
}

// ============================================================================
// ALIASES
// ============================================================================

#[test]
fn argument_binding_alias() {
    let mut engine = RuleEngine::builder()
        .alias_with_args("positive", "range", vec![json!(1), Value::Null])
        .rules(json!({"x": ["positive"]}))
        .data(json!({"x": -5}))
        .build()
        .unwrap();
    assert!(!engine.is_valid().unwrap());
    assert!(engine.errors().unwrap().contains_key("x"));

    engine.set_data(json!({"x": 10}));
    assert!(engine.is_valid().unwrap());
}

// ============================================================================
// MESSAGES
// ============================================================================

#[test]
fn message_override_interpolates_placeholders() {
    let mut engine = engine_with(
        json!({"age": [
            ["range", 0, 120, {"message": "{field} must be between {0} and {1}, got {value}"}],
        ]}),
        json!({"age": 150}),
    );
    assert_eq!(
        engine.errors().unwrap()["age"],
        "age must be between 0 and 120, got 150"
    );
}

#[test]
fn checker_message_is_used_when_no_override() {
    let mut engine = engine_with(
        json!({"email": [["email"]]}),
        json!({"email": "not-an-email"}),
    );
    assert_eq!(engine.errors().unwrap()["email"], "Must be a valid email address");
}

#[test]
fn default_message_names_the_condition() {
    let mut engine = RuleEngine::builder()
        .condition_fn("even", |value, _| {
            Ok(Outcome::from(value.as_i64().is_some_and(|n| n % 2 == 0)))
        })
        .rules(json!({"n": ["even"]}))
        .data(json!({"n": 3}))
        .build()
        .unwrap();
    assert_eq!(
        engine.errors().unwrap()["n"],
        "Condition `even` was not satisfied"
    );
}

// ============================================================================
// HALT AND CONDITIONAL SKIPS
// ============================================================================

#[test]
fn halt_stops_the_field_without_an_error() {
    let mut engine = RuleEngine::builder()
        .condition_fn("draft_gate", |value, _| {
            if value.as_str() == Some("draft") {
                Ok(Outcome::Halt)
            } else {
                Ok(Outcome::Pass)
            }
        })
        .rules(json!({"status": [["draft_gate"], ["length", 40]]}))
        .data(json!({"status": "draft"}))
        .build()
        .unwrap();
    assert!(engine.is_valid().unwrap());
}

#[test]
fn skip_predicate_gates_a_single_rule() {
    let build = |strict: bool| {
        RuleEngine::builder()
            .predicate("strict_mode", |scope: &Scope<'_>| {
                scope.context.get("strict").and_then(Value::as_bool) == Some(true)
            })
            .rules(json!({"code": [
                ["longer", 8, {"if": "strict_mode"}],
                ["regexp", "^[A-Z]+"],
            ]}))
            .data(json!({"code": "ABC"}))
            .context(json!({"strict": strict}))
            .build()
            .unwrap()
    };

    // Lax: the guarded length rule is skipped, the regexp still runs and passes.
    assert!(build(false).is_valid().unwrap());

    // Strict: the guarded rule applies and fails.
    let mut strict = build(true);
    assert_eq!(
        strict.errors().unwrap()["code"],
        "Must be at least 8 characters"
    );
}

// ============================================================================
// DEGRADED CHECK ERRORS AND CONFIG ERRORS
// ============================================================================

#[test]
fn check_evaluation_error_degrades_to_failure() {
    // "(" is not a valid pattern: the regexp check errors internally, the
    // field is marked invalid with the default message, and the pass
    // completes.
    let mut engine = engine_with(
        json!({"x": [["regexp", "("]], "y": [["integer"]]}),
        json!({"x": "anything", "y": 3}),
    );
    let errors = engine.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["x"], "Condition `regexp` was not satisfied");
}

#[test]
fn malformed_rules_are_rejected_without_touching_state() {
    let mut engine = engine_with(json!({"age": [["range", 0, 120]]}), json!({"age": 150}));
    assert!(!engine.is_valid().unwrap());

    let err = engine.set_rules(json!({"age": [["nosuch:thing"]]})).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownChecker { .. }));

    // The previous rule set is still in effect.
    assert!(!engine.is_valid().unwrap());
}

#[test]
fn unknown_predicate_in_compiled_rules_is_fatal_at_evaluation() {
    let mut set = RuleSet::new();
    set.insert(
        "x",
        vec![
            RuleSpec::new("notEmpty", Condition::checker("type", "notEmpty")).when("nosuch"),
        ],
    );
    let mut engine = RuleEngine::new();
    engine.set_rule_set(set).set_data(json!({"x": "value"}));
    let err = engine.is_valid().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPredicate { .. }));
}

// ============================================================================
// VALUE ACCESS
// ============================================================================

#[test]
fn value_accessors() {
    let engine = engine_with(json!({}), json!({"a": 1}));
    assert_eq!(engine.value_of("a"), Some(json!(1)));
    assert_eq!(engine.value_of("b"), None);
    assert_eq!(engine.value_or("b", json!("fallback")), json!("fallback"));
}
