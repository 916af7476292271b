//! Convenience macro for writing rule documents inline.

/// Builds a rule document (`serde_json::Value`) with JSON syntax.
///
/// Purely a readability wrapper: the output is exactly what
/// [`set_rules`](crate::engine::RuleEngine::set_rules) accepts.
///
/// # Examples
///
/// ```
/// use rulecheck::{rules, engine::RuleEngine};
/// use serde_json::json;
///
/// let doc = rules! {
///     "email": [["required"], ["email"]],
///     "age": [["integer"], ["range", 0, 120]],
/// };
///
/// let mut engine = RuleEngine::new();
/// engine.set_rules(doc).unwrap().set_data(json!({"email": "", "age": 30}));
/// assert!(!engine.is_valid().unwrap());
/// ```
#[macro_export]
macro_rules! rules {
    ($($body:tt)*) => {
        $crate::__private::json!({ $($body)* })
    };
}
