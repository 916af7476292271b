//! `{name}` placeholder interpolation for failure messages
//!
//! The engine exposes `field`, `condition`, `value`, and the rule's
//! positional arguments (as `{0}`, `{1}`, …) to the template. Placeholders
//! with no matching variable are left verbatim, so a stray brace in a
//! message never breaks anything.

/// Replaces `{name}` placeholders with values from `vars`.
///
/// # Examples
///
/// ```
/// use rulecheck::interpolate::interpolate;
///
/// let text = interpolate(
///     "{field} must be in range {0}..{1}",
///     &[("field", "age"), ("0", "0"), ("1", "120")],
/// );
/// assert_eq!(text, "age must be in range 0..120");
///
/// // Unresolved placeholders stay verbatim.
/// assert_eq!(interpolate("keep {this}", &[] as &[(&str, &str)]), "keep {this}");
/// ```
#[must_use]
pub fn interpolate<K, V>(template: &str, vars: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            // Unterminated brace: emit the remainder as-is.
            out.push_str(tail);
            return out;
        };
        let name = &tail[1..end];
        match vars.iter().find(|(k, _)| k.as_ref() == name) {
            Some((_, value)) => out.push_str(value.as_ref()),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}
