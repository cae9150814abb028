// Palisade - Declarative input validation for Rust
//
// This library evaluates assertion expressions ("required & isString &
// longerThan(4)") against values and nested containers addressed by glob
// field paths, with logic combinators and a structured result model.

// Re-export the engine
pub use palisade_core::*;

// Re-export the built-in catalog and its default registry
pub use palisade_checks::{self, default_registry, register_builtins};

use serde_json::Value;

/// Validate a single value against the default check registry.
///
/// ```
/// use serde_json::json;
///
/// let mut validator = palisade::value(json!("hello")).var_name("greeting");
/// validator.assert("required & isString & longerThan(4)").unwrap();
/// assert!(validator.success());
/// ```
pub fn value(value: impl Into<Value>) -> ValueValidator {
    ValueValidator::new(default_registry(), value.into())
}

/// Validate a nested container against the default check registry.
///
/// ```
/// use serde_json::json;
///
/// let data = json!({"user": {"email": "ada@example.com"}});
/// let results = palisade::container()
///     .passes(&data, [("user/email", "required & isEmail")])
///     .unwrap();
/// assert!(results.success());
/// ```
pub fn container() -> ContainerValidator {
    ContainerValidator::new(default_registry())
}

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AssertionBag,
        AssertionResult,
        Branch,
        CheckRegistry,
        ContainerResultBag,
        ContainerValidator,
        FailedValidation,
        FlattenedContainer,
        Logic,
        LogicOutcome,
        ResultBag,
        Spec,
        ValidationData,
        ValidationError,
        ValueValidator,
        default_registry,
        normalize,
        register_builtins,
    };
}
