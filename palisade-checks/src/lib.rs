//! Built-in check catalog for the palisade validation engine
//!
//! Provides the concrete checks behind names like `isString`, `longerThan`
//! or `isEmail`, a [`register_builtins`] helper for composing custom
//! registries, and the process-wide [`default_registry`] created once on
//! first use.
//!
//! # Examples
//!
//! ```
//! use palisade_checks::default_registry;
//! use palisade_core::ValueValidator;
//! use serde_json::json;
//!
//! let mut validator = ValueValidator::new(default_registry(), json!("ada@example.com"))
//!     .var_name("email");
//! validator.assert("required & isString & isEmail").unwrap();
//! assert!(validator.success());
//! ```
//!
//! Custom checks extend a copy of the catalog:
//!
//! ```
//! use palisade_checks::register_builtins;
//! use palisade_core::{AssertionResult, CheckRegistry};
//!
//! let mut registry = CheckRegistry::new();
//! register_builtins(&mut registry);
//! registry.register("isEven", |value, _args| {
//!     if value.as_i64().is_some_and(|n| n % 2 == 0) {
//!         AssertionResult::passed("{name} is even")
//!     } else {
//!         AssertionResult::failed("{name} must be even")
//!     }
//! });
//! assert!(registry.has_check("isEven"));
//! ```

pub mod catalog;

use log::debug;
use once_cell::sync::Lazy;
use palisade_core::CheckRegistry;
use std::sync::Arc;

static DEFAULT_REGISTRY: Lazy<Arc<CheckRegistry>> = Lazy::new(|| {
    let mut registry = CheckRegistry::new();
    register_builtins(&mut registry);
    debug!(
        target: "palisade::checks",
        "default registry initialized with {} checks",
        registry.len()
    );
    Arc::new(registry)
});

/// The process-wide registry holding the built-in catalog.
///
/// Created once on first use and shared behind an `Arc`; validators that
/// need a different catalog take their own registry at construction instead
/// of mutating this one.
pub fn default_registry() -> Arc<CheckRegistry> {
    DEFAULT_REGISTRY.clone()
}

/// Register every built-in check into a registry.
pub fn register_builtins(registry: &mut CheckRegistry) {
    // Type checks
    registry.register("isString", catalog::is_string);
    registry.register("isInteger", catalog::is_integer);
    registry.register("isFloat", catalog::is_float);
    registry.register("isNumeric", catalog::is_numeric);
    registry.register("isBoolean", catalog::is_boolean);
    registry.register("isArray", catalog::is_array);
    registry.register("isObject", catalog::is_object);
    registry.register("isNull", catalog::is_null);
    registry.register("notEmpty", catalog::not_empty);

    // String checks
    registry.register("longerThan", catalog::longer_than);
    registry.register("shorterThan", catalog::shorter_than);
    registry.register("lengthBetween", catalog::length_between);
    registry.register("containsString", catalog::contains_string);
    registry.register("startsWith", catalog::starts_with);
    registry.register("endsWith", catalog::ends_with);
    registry.register("matchesRegex", catalog::matches_regex);
    registry.register("isEmail", catalog::is_email);
    registry.register("isUrl", catalog::is_url);
    registry.register("isUuid", catalog::is_uuid);
    registry.register("isAlpha", catalog::is_alpha);
    registry.register("isAlphanumeric", catalog::is_alphanumeric);
    registry.register("isDigits", catalog::is_digits);

    // Numeric checks
    registry.register("isGreaterThan", catalog::is_greater_than);
    registry.register("isGreaterThanOrEqual", catalog::is_greater_than_or_equal);
    registry.register("isLessThan", catalog::is_less_than);
    registry.register("isLessThanOrEqual", catalog::is_less_than_or_equal);
    registry.register("between", catalog::between);
    registry.register("isNaturalNumber", catalog::is_natural_number);
    registry.register("isPositive", catalog::is_positive);
    registry.register("isNegative", catalog::is_negative);

    // Equality and membership checks
    registry.register("equals", catalog::equals);
    registry.register("inArray", catalog::in_array);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_catalog() {
        let registry = default_registry();
        assert!(registry.has_check("isString"));
        assert!(registry.has_check("longerthan"));
        assert!(registry.has_check("ISEMAIL"));
        assert!(!registry.has_check("isTeapot"));
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
