//! Presence and type-shape checks
//!
//! Registered as `type` in the standard registry. `notEmpty` and `notNull`
//! are the methods the default empty-skip policy exempts: they are the
//! checks that must run precisely when the value is missing.

use serde_json::Value;
use std::borrow::Cow;

use crate::core::{CheckError, Outcome, is_empty_value};

use super::Checker;

/// Checks value presence and JSON type shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeChecker;

impl Checker for TypeChecker {
    fn methods(&self) -> &'static [&'static str] {
        &["notEmpty", "notNull", "boolean", "string", "integer", "number"]
    }

    fn check(
        &self,
        method: &str,
        value: &Value,
        _args: &[Value],
    ) -> Result<Outcome, CheckError> {
        let ok = match method {
            "notEmpty" => !is_empty_value(value),
            "notNull" => !value.is_null(),
            "boolean" => value.is_boolean(),
            "string" => value.is_string(),
            "integer" => value.is_i64() || value.is_u64(),
            "number" => value.is_number(),
            other => return Err(CheckError::unsupported(other)),
        };
        Ok(Outcome::from(ok))
    }

    fn message_for(&self, method: &str) -> Option<Cow<'static, str>> {
        let message = match method {
            "notEmpty" => "This value is required",
            "notNull" => "This value cannot be null",
            "boolean" => "Must be a boolean",
            "string" => "Must be a string",
            "integer" => "Must be an integer",
            "number" => "Must be a number",
            _ => return None,
        };
        Some(Cow::Borrowed(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(method: &str, value: &Value) -> Outcome {
        TypeChecker.check(method, value, &[]).unwrap()
    }

    #[test]
    fn not_empty() {
        assert!(check("notEmpty", &json!("x")).is_pass());
        assert!(check("notEmpty", &json!(0)).is_pass());
        assert!(check("notEmpty", &json!("")).is_fail());
        assert!(check("notEmpty", &Value::Null).is_fail());
        assert!(check("notEmpty", &json!([])).is_fail());
    }

    #[test]
    fn not_null() {
        assert!(check("notNull", &json!("")).is_pass());
        assert!(check("notNull", &Value::Null).is_fail());
    }

    #[test]
    fn shapes() {
        assert!(check("boolean", &json!(true)).is_pass());
        assert!(check("boolean", &json!(1)).is_fail());
        assert!(check("string", &json!("s")).is_pass());
        assert!(check("integer", &json!(3)).is_pass());
        assert!(check("integer", &json!(3.5)).is_fail());
        assert!(check("number", &json!(3.5)).is_pass());
        assert!(check("number", &json!("3.5")).is_fail());
    }

    #[test]
    fn unknown_method_is_an_error() {
        let err = TypeChecker.check("frob", &json!(1), &[]).unwrap_err();
        assert!(matches!(err, CheckError::UnsupportedMethod { .. }));
    }

    #[test]
    fn messages_cover_all_methods() {
        for method in TypeChecker.methods() {
            assert!(TypeChecker.message_for(method).is_some(), "{method}");
        }
    }
}
