//! Core types shared by the engine, the rule compiler, and checkers
//!
//! - **Errors**: [`ConfigError`] (fatal configuration mistakes) and
//!   [`CheckError`] (internal failures while a check runs)
//! - **Results**: [`Outcome`] — the structured verdict of a single check
//! - **Values**: emptiness and rendering helpers over `serde_json::Value`

pub mod error;
pub mod outcome;
pub mod value;

pub use error::{CheckError, ConfigError};
pub use outcome::Outcome;
pub use value::{is_empty_value, json_type_name, render_value};
