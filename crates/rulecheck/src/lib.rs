//! # rulecheck
//!
//! A rule-driven data validation engine: per-field rule lists, pluggable
//! checkers, conditional skips, and interpolated error messages.
//!
//! ## Quick Start
//!
//! ```
//! use rulecheck::prelude::*;
//! use serde_json::json;
//!
//! let mut engine = RuleEngine::new();
//! engine
//!     .set_rules(json!({
//!         "email": [["required"], ["email"]],
//!         "age": [["integer"], ["range", 0, 120]],
//!     }))
//!     .unwrap()
//!     .set_data(json!({"email": "user@example.com", "age": 34}));
//!
//! assert!(engine.is_valid().unwrap());
//! ```
//!
//! ## How It Fits Together
//!
//! - [`engine::RuleEngine`] owns the data, the compiled rules, and the
//!   error state, validating lazily and idempotently.
//! - [`rules`](mod@rules) compiles the JSON rule grammar once, resolving aliases and
//!   every `checker:method` reference up front.
//! - [`checkers`] holds the built-in check families (`type`, `number`,
//!   `string`, `address`) and the [`Checker`](checkers::Checker) capability
//!   for custom ones.
//! - [`registry`] is the explicit wiring: checkers, named condition
//!   functions, and skip predicates, injected at construction.
//!
//! Failed rules land in an ordered field → message map; configuration
//! mistakes (unknown checkers, malformed rules) are hard errors instead.

pub mod checkers;
pub mod context;
pub mod core;
pub mod engine;
pub mod interpolate;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rules;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
