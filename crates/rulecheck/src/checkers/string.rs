//! String length and pattern checks
//!
//! Registered as `string`. Lengths count Unicode scalar values, not bytes.
//! `regexp` compiles its pattern per evaluation; a pattern that does not
//! compile is a [`CheckError`] the engine degrades to a failed check.

use serde_json::Value;
use std::borrow::Cow;

use crate::core::{CheckError, Outcome};

use super::{Checker, str_arg, usize_arg};

/// Checks string length and regular-expression patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringChecker;

impl Checker for StringChecker {
    fn methods(&self) -> &'static [&'static str] {
        &["shorter", "longer", "length", "range", "regexp"]
    }

    fn check(
        &self,
        method: &str,
        value: &Value,
        args: &[Value],
    ) -> Result<Outcome, CheckError> {
        let Some(text) = value.as_str() else {
            return Ok(Outcome::from(false));
        };
        let chars = text.chars().count();

        let ok = match method {
            "shorter" => chars <= usize_arg(args, 0)?,
            "longer" => chars >= usize_arg(args, 0)?,
            "length" => chars == usize_arg(args, 0)?,
            "range" => {
                let min = usize_arg(args, 0)?;
                let max = usize_arg(args, 1)?;
                chars >= min && chars <= max
            }
            "regexp" => {
                let pattern = regex::Regex::new(str_arg(args, 0)?)?;
                pattern.is_match(text)
            }
            other => return Err(CheckError::unsupported(other)),
        };
        Ok(Outcome::from(ok))
    }

    fn message_for(&self, method: &str) -> Option<Cow<'static, str>> {
        let message = match method {
            "shorter" => "Must be no longer than {0} characters",
            "longer" => "Must be at least {0} characters",
            "length" => "Must be exactly {0} characters",
            "range" => "Length must be between {0} and {1}",
            "regexp" => "Does not match the required format",
            _ => return None,
        };
        Some(Cow::Borrowed(message))
    }
}
