//! The structured verdict of a single check
//!
//! Checks report one of three things: the value passed, the value failed
//! (optionally carrying the checker's own failure message), or further rules
//! for this field should be skipped without recording an error. The last
//! variant exists for checks that can decide a field needs no further
//! scrutiny — for example an optional field in a state where the remaining
//! rules are meaningless.

use std::borrow::Cow;

/// Result of evaluating one condition against one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value satisfies the condition; evaluation moves to the next rule.
    Pass,
    /// The value does not satisfy the condition.
    ///
    /// The payload is an optional failure message supplied by the check
    /// itself; when absent, the engine falls back to the checker's
    /// per-method message and then to the default template.
    Fail(Option<Cow<'static, str>>),
    /// Stop evaluating this field's remaining rules without an error.
    Halt,
}

impl Outcome {
    /// Failure with a check-supplied message.
    pub fn fail(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Fail(Some(message.into()))
    }

    /// True if the check passed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// True if the check failed (with or without a message).
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

impl From<bool> for Outcome {
    /// `true` maps to [`Outcome::Pass`], `false` to a message-less
    /// [`Outcome::Fail`].
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail(None) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_conversion() {
        assert_eq!(Outcome::from(true), Outcome::Pass);
        assert_eq!(Outcome::from(false), Outcome::Fail(None));
    }

    #[test]
    fn fail_carries_message() {
        let outcome = Outcome::fail("too short");
        assert!(outcome.is_fail());
        assert_eq!(outcome, Outcome::Fail(Some("too short".into())));
    }
}
