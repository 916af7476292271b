//! Numeric bound checks
//!
//! Registered as `number`. A `null` (or absent) bound in `range` leaves
//! that side unbounded, which arg-carrying aliases such as `positive`
//! (`number:range` with `[1, null]`) rely on.

use serde_json::Value;
use std::borrow::Cow;

use crate::core::{CheckError, Outcome};

use super::{Checker, bound_arg, number_arg};

/// Checks numeric values against inclusive bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberChecker;

impl Checker for NumberChecker {
    fn methods(&self) -> &'static [&'static str] {
        &["range", "higher", "lower"]
    }

    fn check(
        &self,
        method: &str,
        value: &Value,
        args: &[Value],
    ) -> Result<Outcome, CheckError> {
        let Some(number) = value.as_f64() else {
            // Non-numeric input fails the check rather than erroring:
            // the value's type is user input, not configuration.
            return Ok(Outcome::from(false));
        };

        let ok = match method {
            "range" => {
                let min = bound_arg(args, 0)?;
                let max = bound_arg(args, 1)?;
                min.is_none_or(|m| number >= m) && max.is_none_or(|m| number <= m)
            }
            "higher" => number >= number_arg(args, 0)?,
            "lower" => number <= number_arg(args, 0)?,
            other => return Err(CheckError::unsupported(other)),
        };
        Ok(Outcome::from(ok))
    }

    fn message_for(&self, method: &str) -> Option<Cow<'static, str>> {
        let message = match method {
            "range" => "Must be in range {0}..{1}",
            "higher" => "Must be at least {0}",
            "lower" => "Must be at most {0}",
            _ => return None,
        };
        Some(Cow::Borrowed(message))
    }
}
