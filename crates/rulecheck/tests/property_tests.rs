//! Property-based tests for the rule engine.

use proptest::prelude::*;
use rulecheck::prelude::*;
use serde_json::json;

// ============================================================================
// IDEMPOTENCY: errors() == errors() without mutation
// ============================================================================

proptest! {
    #[test]
    fn errors_idempotent(name in ".{0,20}", age in any::<i64>()) {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({
                "name": [["required"], ["longer", 3]],
                "age": [["integer"], ["range", 0, 120]],
            }))
            .unwrap()
            .set_data(json!({"name": name, "age": age}));

        let first = engine.errors().unwrap();
        let second = engine.errors().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn is_valid_iff_error_map_empty(value in ".{0,10}") {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({"x": [["required"], ["longer", 4]]}))
            .unwrap()
            .set_data(json!({"x": value}));

        let valid = engine.is_valid().unwrap();
        prop_assert_eq!(valid, engine.errors().unwrap().is_empty());
    }
}

// ============================================================================
// PASSING DATA IS VALID
// ============================================================================

proptest! {
    #[test]
    fn in_range_ages_are_valid(age in 0i64..=120) {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({"age": [["integer"], ["range", 0, 120]]}))
            .unwrap()
            .set_data(json!({"age": age}));
        prop_assert!(engine.is_valid().unwrap());
    }

    #[test]
    fn out_of_range_ages_are_invalid(age in 121i64..10_000) {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({"age": [["integer"], ["range", 0, 120]]}))
            .unwrap()
            .set_data(json!({"age": age}));
        prop_assert!(!engine.is_valid().unwrap());
        prop_assert!(engine.errors().unwrap().contains_key("age"));
    }
}

// ============================================================================
// FIRST FAILURE WINS
// ============================================================================

proptest! {
    #[test]
    fn at_most_one_error_per_field(value in ".{1,30}") {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({"x": [
                ["longer", 10, {"message": "first"}],
                ["regexp", "^[0-9]+$", {"message": "second"}],
            ]}))
            .unwrap()
            .set_data(json!({"x": value}));

        let errors = engine.errors().unwrap();
        if let Some(message) = errors.get("x") {
            // Whenever the first rule fails, its message is the one recorded.
            if value.chars().count() < 10 {
                prop_assert_eq!(message, "first");
            }
        }
    }
}

// ============================================================================
// REGISTERED ERRORS ALWAYS WIN
// ============================================================================

proptest! {
    #[test]
    fn registered_error_overrides_any_rule_message(message in "[a-z]{1,16}") {
        let mut engine = RuleEngine::new();
        engine
            .set_rules(json!({"x": [["longer", 100]]}))
            .unwrap()
            .set_data(json!({"x": "short"}));
        engine.register_error("x", message.clone());

        prop_assert!(!engine.is_valid().unwrap());
        prop_assert_eq!(engine.errors().unwrap()["x"].clone(), message);
    }
}
