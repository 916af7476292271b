//! Email and URL format checks
//!
//! Registered as `address`.

use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::core::{CheckError, Outcome};

use super::Checker;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

static URL_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

/// Checks email and URL formats.
#[derive(Debug, Clone)]
pub struct AddressChecker {
    email: regex::Regex,
    url: regex::Regex,
}

impl AddressChecker {
    /// Creates the checker with the built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: EMAIL_REGEX.clone(),
            url: URL_REGEX.clone(),
        }
    }
}

impl Default for AddressChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for AddressChecker {
    fn methods(&self) -> &'static [&'static str] {
        &["email", "url"]
    }

    fn check(
        &self,
        method: &str,
        value: &Value,
        _args: &[Value],
    ) -> Result<Outcome, CheckError> {
        let Some(text) = value.as_str() else {
            return Ok(Outcome::from(false));
        };

        let ok = match method {
            "email" => self.email.is_match(text),
            "url" => self.url.is_match(text),
            other => return Err(CheckError::unsupported(other)),
        };
        Ok(Outcome::from(ok))
    }

    fn message_for(&self, method: &str) -> Option<Cow<'static, str>> {
        let message = match method {
            "email" => "Must be a valid email address",
            "url" => "Must be a valid URL",
            _ => return None,
        };
        Some(Cow::Borrowed(message))
    }
}
