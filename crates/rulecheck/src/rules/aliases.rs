//! Short rule names and what they expand to
//!
//! An alias maps a short name (`required`, `email`, `positive`) to a full
//! condition reference, optionally binding arguments. Expansion happens at
//! rule-set compile time; an alias may point at another alias, with a cycle
//! reported as a [`ConfigError::AliasCycle`].

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

use crate::core::ConfigError;

/// Expansion target of one alias: a condition reference plus bound
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTarget {
    /// Condition reference the alias stands for.
    pub reference: String,
    /// Arguments bound by the alias, placed before any arguments the rule
    /// document supplies.
    pub args: Vec<Value>,
}

/// Short name → condition reference table, configured at engine
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    entries: IndexMap<String, AliasTarget>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard table wiring the built-in checker methods to
    /// their conventional short names.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (name, reference) in [
            ("required", "type:notEmpty"),
            ("notEmpty", "type:notEmpty"),
            ("notNull", "type:notNull"),
            ("boolean", "type:boolean"),
            ("string", "type:string"),
            ("integer", "type:integer"),
            ("number", "type:number"),
            ("email", "address:email"),
            ("url", "address:url"),
            ("range", "number:range"),
            ("higher", "number:higher"),
            ("lower", "number:lower"),
            ("shorter", "string:shorter"),
            ("longer", "string:longer"),
            ("length", "string:length"),
            ("lengthRange", "string:range"),
            ("regexp", "string:regexp"),
        ] {
            table.alias(name, reference);
        }
        table
    }

    /// Adds or replaces an alias.
    pub fn alias(&mut self, name: impl Into<String>, reference: impl Into<String>) -> &mut Self {
        self.alias_with_args(name, reference, Vec::new())
    }

    /// Adds or replaces an alias that binds arguments, e.g.
    /// `positive` → `number:range` with `[1, null]`.
    pub fn alias_with_args(
        &mut self,
        name: impl Into<String>,
        reference: impl Into<String>,
        args: Vec<Value>,
    ) -> &mut Self {
        self.entries.insert(
            name.into(),
            AliasTarget {
                reference: reference.into(),
                args,
            },
        );
        self
    }

    /// Looks up a single alias without expanding chains.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AliasTarget> {
        self.entries.get(name)
    }

    /// True if `name` is aliased.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Fully expands `name`, following alias chains and normalizing the
    /// `::` separator. Returns the final reference and the accumulated
    /// bound arguments: arguments bound closest to the final reference come
    /// first, the rule document's own arguments are appended by the caller.
    pub(crate) fn expand(
        &self,
        name: &str,
        field: &str,
    ) -> Result<(String, Vec<Value>), ConfigError> {
        let mut reference = name.to_string();
        let mut bound: Vec<Value> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();

        while let Some(target) = self.entries.get(&reference) {
            if !visited.insert(reference.clone()) {
                return Err(ConfigError::AliasCycle {
                    field: field.to_string(),
                    name: name.to_string(),
                });
            }
            let mut next_bound = target.args.clone();
            next_bound.append(&mut bound);
            bound = next_bound;
            reference = target.reference.clone();
        }

        Ok((reference.replace("::", ":"), bound))
    }
}
