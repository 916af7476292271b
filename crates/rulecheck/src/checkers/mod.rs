//! Built-in checkers and the checker capability
//!
//! A checker is a named family of related check methods, addressed from
//! rules as `checker:method` (`"type:notEmpty"`, `"number:range"`). The
//! built-ins cover the common ground:
//!
//! - [`TypeChecker`] (`type`) — `notEmpty`, `notNull`, `boolean`, `string`,
//!   `integer`, `number`
//! - [`NumberChecker`] (`number`) — `range`, `higher`, `lower`
//! - [`StringChecker`] (`string`) — `shorter`, `longer`, `length`, `range`,
//!   `regexp`
//! - [`AddressChecker`] (`address`) — `email`, `url`
//!
//! Custom checkers implement [`Checker`] and register under a short name
//! via [`CheckerRegistry::register`](crate::registry::CheckerRegistry::register).

use serde_json::Value;
use std::borrow::Cow;

use crate::core::{CheckError, Outcome};

pub mod address;
pub mod number;
pub mod string;
pub mod types;

pub use address::AddressChecker;
pub use number::NumberChecker;
pub use string::StringChecker;
pub use types::TypeChecker;

// ============================================================================
// CHECKER CAPABILITY
// ============================================================================

/// A named family of check methods.
///
/// `check` evaluates one method against a value and the rule's argument
/// list. A message-less [`Outcome::Fail`] lets the engine consult
/// [`message_for`](Checker::message_for) and fall back to the default
/// template; returning [`Outcome::fail`] with a message overrides both.
///
/// The advertised [`methods`](Checker::methods) list is what rule
/// compilation validates references against, so it must cover everything
/// `check` accepts.
pub trait Checker: Send + Sync {
    /// Methods this checker provides.
    fn methods(&self) -> &'static [&'static str];

    /// Evaluates `method` against `value` with the rule's arguments.
    fn check(&self, method: &str, value: &Value, args: &[Value])
    -> Result<Outcome, CheckError>;

    /// Custom failure message for a method, if the checker has one.
    fn message_for(&self, method: &str) -> Option<Cow<'static, str>> {
        let _ = method;
        None
    }

    /// True if `method` is advertised by this checker.
    fn has_method(&self, method: &str) -> bool {
        self.methods().contains(&method)
    }
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Numeric argument where `null` or absence means "unbounded".
pub(crate) fn bound_arg(args: &[Value], index: usize) -> Result<Option<f64>, CheckError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(CheckError::bad_argument(index, "number or null")),
    }
}

/// Required numeric argument.
pub(crate) fn number_arg(args: &[Value], index: usize) -> Result<f64, CheckError> {
    args.get(index)
        .and_then(Value::as_f64)
        .ok_or(CheckError::bad_argument(index, "number"))
}

/// Required non-negative integer argument.
pub(crate) fn usize_arg(args: &[Value], index: usize) -> Result<usize, CheckError> {
    args.get(index)
        .and_then(Value::as_u64)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .ok_or(CheckError::bad_argument(index, "non-negative integer"))
}

/// Required string argument.
pub(crate) fn str_arg<'a>(args: &'a [Value], index: usize) -> Result<&'a str, CheckError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or(CheckError::bad_argument(index, "string"))
}
