//! Assertion-expression validation engine
//!
//! Evaluates declarative sets of named checks against values or nested
//! containers, producing structured pass/fail results with renderable
//! messages. Checks themselves are pluggable: the engine resolves names
//! through an injected [`CheckRegistry`] and never constructs concrete
//! checks itself.
//!
//! # Examples
//!
//! ## Validating a single value
//!
//! ```
//! use palisade_core::{AssertionResult, CheckRegistry, ValueValidator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = CheckRegistry::new();
//! registry.register("isString", |value, _args| {
//!     if value.is_string() {
//!         AssertionResult::passed("{name} is a string")
//!     } else {
//!         AssertionResult::failed("{name} must be a string, got {value:type}")
//!     }
//! });
//! let registry = Arc::new(registry);
//!
//! let mut validator = ValueValidator::new(registry, json!(42)).var_name("greeting");
//! validator.assert("isString").unwrap();
//!
//! assert!(!validator.success());
//! assert_eq!(
//!     validator.error_messages(),
//!     vec!["greeting must be a string, got integer"]
//! );
//! ```
//!
//! ## Validating a container with glob paths
//!
//! ```
//! use palisade_core::{AssertionResult, CheckRegistry, ContainerValidator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = CheckRegistry::new();
//! registry.register("isString", |value, _args| {
//!     if value.is_string() {
//!         AssertionResult::passed("{name} is a string")
//!     } else {
//!         AssertionResult::failed("{name} must be a string")
//!     }
//! });
//! let registry = Arc::new(registry);
//!
//! let data = json!({"users": [{"name": "ada"}, {"name": "grace"}]});
//! let results = ContainerValidator::new(registry)
//!     .passes(&data, [("users/*/name", "required & isString")])
//!     .unwrap();
//!
//! assert!(results.success());
//! assert_eq!(results.results_at("users/1/name").len(), 2);
//! ```

mod adapter;
mod assertion;
mod container;
mod errors;
mod flattened;
mod logic;
mod parser;
mod registry;
mod result;
mod template;
mod value;

pub use adapter::*;
pub use assertion::*;
pub use container::*;
pub use errors::*;
pub use flattened::*;
pub use logic::*;
pub use parser::*;
pub use registry::*;
pub use result::*;
pub use value::*;
