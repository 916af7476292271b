//! Rule sets: the grammar, the alias table, and the compiled form
//!
//! Rule documents arrive as JSON (see [`parse`]) and are compiled exactly
//! once, when assigned to an engine. Compilation expands aliases, normalizes
//! `::` references, resolves every reference against the registries, and
//! fails fast on anything malformed — validation itself never parses
//! strings.

pub mod aliases;
pub mod parse;
pub mod spec;

pub use aliases::{AliasTable, AliasTarget};
pub use spec::{Args, Condition, RuleSet, RuleSpec};
