//! Helpers over `serde_json::Value`, the engine's dynamic value type

use serde_json::Value;

/// Decides whether a field value counts as empty for the skip policy.
///
/// Absent fields reach the engine as `Null`. Strings, arrays, and objects
/// are empty when they have no content. Numbers and booleans are never
/// empty: `0` and `false` are real values a rule may want to inspect.
///
/// # Examples
///
/// ```
/// use rulecheck::core::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!("")));
/// assert!(is_empty_value(&json!([])));
/// assert!(!is_empty_value(&json!(0)));
/// assert!(!is_empty_value(&json!(false)));
/// ```
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Renders a value for message interpolation.
///
/// Strings render without surrounding quotes; everything else uses compact
/// JSON notation.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON type name, used in error messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
