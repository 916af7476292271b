//! One-stop import for the working set.
//!
//! ```
//! use rulecheck::prelude::*;
//! use serde_json::json;
//!
//! let mut engine = RuleEngine::new();
//! engine
//!     .set_rules(json!({"name": ["required"]}))
//!     .unwrap()
//!     .set_data(json!({"name": "ada"}));
//! assert!(engine.is_valid().unwrap());
//! ```

pub use crate::checkers::{AddressChecker, Checker, NumberChecker, StringChecker, TypeChecker};
pub use crate::context::{Context, DataSource, FieldValue, Pack};
pub use crate::core::{CheckError, ConfigError, Outcome};
pub use crate::engine::{DEFAULT_MESSAGE, EmptyPolicy, RuleEngine, RuleEngineBuilder};
pub use crate::interpolate::interpolate;
pub use crate::registry::{CheckerRegistry, ConditionFn, ConditionRegistry, Predicate, Scope};
pub use crate::rules::{AliasTable, AliasTarget, Args, Condition, RuleSet, RuleSpec};
