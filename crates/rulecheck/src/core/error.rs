//! Error types for the two failure classes the engine distinguishes
//!
//! [`ConfigError`] covers programming and configuration mistakes: malformed
//! rule documents, references to checkers or conditions that were never
//! registered, alias cycles. These are fatal and surface as `Err` from
//! [`set_rules`](crate::engine::RuleEngine::set_rules) or, for errors only
//! discoverable during evaluation, from
//! [`is_valid`](crate::engine::RuleEngine::is_valid) /
//! [`errors`](crate::engine::RuleEngine::errors).
//!
//! [`CheckError`] covers failures *inside* a running check: an argument that
//! does not fit the value at hand, a pattern that does not compile. The
//! engine catches these, logs them, and degrades them to a plain validation
//! failure so one buggy check cannot take down the whole pass.

use thiserror::Error;

// ============================================================================
// CONFIGURATION ERRORS (FATAL)
// ============================================================================

/// A mistake in the rule document or in the wiring of registries.
///
/// Never produced by user input; always indicates a bug in the calling code
/// or its configuration, so it is returned as a hard error instead of being
/// folded into the validation error map.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rule document was not a JSON object.
    #[error("rules document must be an object, got {found}")]
    RulesNotObject {
        /// JSON type name of the offending document.
        found: &'static str,
    },

    /// A rule entry had a shape the grammar does not allow.
    #[error("field `{field}`: {reason}")]
    MalformedRule {
        /// Field the rule was declared for.
        field: String,
        /// What exactly was wrong with the entry.
        reason: String,
    },

    /// A named option carried in a rule entry is not part of the grammar.
    #[error("field `{field}`: unknown rule option `{key}`")]
    UnknownOption { field: String, key: String },

    /// A `checker:method` reference named a checker that is not registered.
    #[error("field `{field}`: unknown checker `{checker}` in `{reference}`")]
    UnknownChecker {
        field: String,
        checker: String,
        reference: String,
    },

    /// A `checker:method` reference named a method the checker does not have.
    #[error("field `{field}`: checker `{checker}` has no method `{method}`")]
    UnknownMethod {
        field: String,
        checker: String,
        method: String,
    },

    /// A bare condition name matched neither an alias, a checker reference,
    /// nor a registered condition function.
    #[error("field `{field}`: unknown condition `{name}`")]
    UnknownCondition { field: String, name: String },

    /// A rule's `if` option named a skip predicate that is not registered.
    #[error("field `{field}`: unknown skip predicate `{name}`")]
    UnknownPredicate { field: String, name: String },

    /// Alias expansion revisited a name it had already expanded.
    #[error("field `{field}`: alias cycle while expanding `{name}`")]
    AliasCycle { field: String, name: String },

    /// A data source could not be normalized into a field mapping.
    #[error("data source did not produce an object: {0}")]
    DataSource(#[from] serde_json::Error),

    /// A data source serialized to a non-object value.
    #[error("data source serialized to {found}, expected an object")]
    DataNotObject { found: &'static str },
}

// ============================================================================
// CHECK EVALUATION ERRORS (DEGRADED)
// ============================================================================

/// A checker or condition function failed while executing.
///
/// With one exception these are caught by the engine, logged with field and
/// condition context, and treated as a failed check. The exception is
/// [`CheckError::UnsupportedMethod`]: a checker rejecting a method it
/// advertised is a configuration problem and is promoted to
/// [`ConfigError::UnknownMethod`].
#[derive(Debug, Error)]
pub enum CheckError {
    /// The requested method is not provided by this checker.
    #[error("method `{method}` is not provided by this checker")]
    UnsupportedMethod { method: String },

    /// A rule argument was missing or had the wrong shape.
    #[error("argument {index}: expected {expected}")]
    BadArgument {
        /// Zero-based position in the rule's argument list.
        index: usize,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },

    /// A regular expression argument failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Anything else a custom checker wants to report.
    #[error("{0}")]
    Other(String),
}

impl CheckError {
    /// Shorthand for [`CheckError::UnsupportedMethod`].
    pub fn unsupported(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Shorthand for [`CheckError::BadArgument`].
    pub fn bad_argument(index: usize, expected: &'static str) -> Self {
        Self::BadArgument { index, expected }
    }

    /// Shorthand for [`CheckError::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_names_the_field() {
        let err = ConfigError::UnknownChecker {
            field: "email".into(),
            checker: "addres".into(),
            reference: "addres:email".into(),
        };
        let text = err.to_string();
        assert!(text.contains("email"));
        assert!(text.contains("addres"));
    }

    #[test]
    fn check_error_shorthands() {
        assert!(matches!(
            CheckError::unsupported("frob"),
            CheckError::UnsupportedMethod { .. }
        ));
        assert!(matches!(
            CheckError::bad_argument(0, "number"),
            CheckError::BadArgument { index: 0, .. }
        ));
    }
}
