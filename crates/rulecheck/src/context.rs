//! The data under validation
//!
//! A [`Context`] is an ordered mapping from field name to value. Values are
//! `serde_json::Value`, except that a field may instead hold a **packable**
//! — a composite that knows how to unwrap itself to a primitive (an embedded
//! record, a computed accessor). Reads through [`Context::get`] always see
//! the unwrapped form; checkers never observe a packable directly.
//!
//! [`DataSource`] normalizes the shapes callers actually have — plain maps,
//! JSON objects, anything `Serialize` via [`Context::from_serialize`] — into
//! a `Context`.
//!
//! # Examples
//!
//! ```
//! use rulecheck::context::Context;
//! use serde_json::json;
//!
//! let mut ctx = Context::new();
//! ctx.insert("name", json!("ada"));
//! assert_eq!(ctx.get("name"), Some(json!("ada")));
//! assert_eq!(ctx.get("missing"), None);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::core::{ConfigError, json_type_name};

// ============================================================================
// PACKABLE VALUES
// ============================================================================

/// A self-describing composite value that unwraps to a primitive.
///
/// Implementations typically wrap an entity or a computed accessor; `pack`
/// produces the primitive form rules are checked against.
pub trait Pack: Send + Sync {
    /// Unwraps the composite into the value checkers see.
    fn pack(&self) -> Value;
}

/// A single stored field value: either a plain JSON value or a packable.
#[derive(Clone)]
pub enum FieldValue {
    /// An ordinary JSON value.
    Plain(Value),
    /// A packable, unwrapped on every read.
    Packed(Arc<dyn Pack>),
}

impl FieldValue {
    /// The primitive form of this value.
    #[must_use]
    pub fn unpack(&self) -> Value {
        match self {
            Self::Plain(value) => value.clone(),
            Self::Packed(packable) => packable.pack(),
        }
    }
}

impl PartialEq for FieldValue {
    /// Packables compare by their unwrapped form, so replacing a packable
    /// with the plain value it packs to is a no-op for change detection.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(a), Self::Plain(b)) => a == b,
            _ => self.unpack() == other.unpack(),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => write!(f, "Plain({value})"),
            Self::Packed(packable) => write!(f, "Packed({})", packable.pack()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Ordered field → value mapping holding the data under validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    fields: IndexMap<String, FieldValue>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes any `Serialize` value into a context.
    ///
    /// The value must serialize to a JSON object; anything else is a
    /// [`ConfigError::DataNotObject`].
    pub fn from_serialize<T: Serialize>(source: &T) -> Result<Self, ConfigError> {
        let value = serde_json::to_value(source)?;
        match value {
            Value::Object(entries) => Ok(entries
                .into_iter()
                .map(|(k, v)| (k, FieldValue::Plain(v)))
                .collect()),
            other => Err(ConfigError::DataNotObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Stores a plain value under `field`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> &mut Self {
        self.fields.insert(field.into(), FieldValue::Plain(value));
        self
    }

    /// Stores a packable under `field`.
    pub fn insert_packed(
        &mut self,
        field: impl Into<String>,
        packable: Arc<dyn Pack>,
    ) -> &mut Self {
        self.fields.insert(field.into(), FieldValue::Packed(packable));
        self
    }

    /// Reads the unwrapped value for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.get(field).map(FieldValue::unpack)
    }

    /// Reads the unwrapped value for `field`, or `default` if absent.
    #[must_use]
    pub fn get_or(&self, field: &str, default: Value) -> Value {
        self.get(field).unwrap_or(default)
    }

    /// True if `field` is present (even if its value is null or empty).
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order, values unwrapped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.unpack()))
    }
}

impl FromIterator<(String, FieldValue)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k, FieldValue::Plain(v)))
            .collect()
    }
}

// ============================================================================
// DATA SOURCES
// ============================================================================

/// Anything that normalizes into a [`Context`].
///
/// Implemented for the shapes integrating layers typically hold: a context
/// itself, plain maps, and JSON objects. A JSON value that is not an object
/// has no fields and normalizes to an empty context; use
/// [`Context::from_serialize`] when that should be an error instead.
pub trait DataSource {
    /// Consumes the source and produces the normalized field mapping.
    fn into_context(self) -> Context;
}

impl DataSource for Context {
    fn into_context(self) -> Context {
        self
    }
}

impl DataSource for IndexMap<String, Value> {
    fn into_context(self) -> Context {
        self.into_iter().collect()
    }
}

impl DataSource for HashMap<String, Value> {
    fn into_context(self) -> Context {
        self.into_iter().collect()
    }
}

impl DataSource for BTreeMap<String, Value> {
    fn into_context(self) -> Context {
        self.into_iter().collect()
    }
}

impl DataSource for Value {
    fn into_context(self) -> Context {
        match self {
            Value::Object(entries) => entries.into_iter().collect(),
            _ => Context::new(),
        }
    }
}

impl DataSource for Vec<(String, Value)> {
    fn into_context(self) -> Context {
        self.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Wrapped(i64);

    impl Pack for Wrapped {
        fn pack(&self) -> Value {
            json!(self.0)
        }
    }

    #[test]
    fn insert_and_get() {
        let mut ctx = Context::new();
        ctx.insert("a", json!(1)).insert("b", json!("two"));
        assert_eq!(ctx.get("a"), Some(json!(1)));
        assert_eq!(ctx.get("b"), Some(json!("two")));
        assert_eq!(ctx.get("c"), None);
        assert_eq!(ctx.get_or("c", json!(0)), json!(0));
    }

    #[test]
    fn packed_values_unwrap_on_read() {
        let mut ctx = Context::new();
        ctx.insert_packed("n", Arc::new(Wrapped(7)));
        assert_eq!(ctx.get("n"), Some(json!(7)));
    }

    #[test]
    fn packed_equals_its_plain_form() {
        let mut packed = Context::new();
        packed.insert_packed("n", Arc::new(Wrapped(7)));
        let mut plain = Context::new();
        plain.insert("n", json!(7));
        assert_eq!(packed, plain);
    }

    #[test]
    fn json_object_normalizes() {
        let ctx = json!({"x": 1, "y": 2}).into_context();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("y"), Some(json!(2)));
    }

    #[test]
    fn non_object_json_normalizes_to_empty() {
        assert!(json!([1, 2, 3]).into_context().is_empty());
        assert!(json!("scalar").into_context().is_empty());
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        #[derive(Serialize)]
        struct Form {
            name: String,
        }

        let ctx = Context::from_serialize(&Form {
            name: "ada".into(),
        })
        .unwrap();
        assert_eq!(ctx.get("name"), Some(json!("ada")));

        let err = Context::from_serialize(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ConfigError::DataNotObject { found: "array" }));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut ctx = Context::new();
        ctx.insert("z", json!(1)).insert("a", json!(2));
        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
