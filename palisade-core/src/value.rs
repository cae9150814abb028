// Value validator: runs checks against one subject value

use crate::container::ContainerValidator;
use crate::errors::ValidationError;
use crate::parser::{self, Spec};
use crate::registry::CheckRegistry;
use crate::result::{AssertionResult, ContainerResultBag, ResultBag};
use serde_json::Value;
use std::sync::Arc;

/// Validates a single value against named checks, accumulating results in a
/// [`ResultBag`].
///
/// In fail-fast mode the first failing check surfaces a
/// [`ValidationError::Failed`] immediately, carrying every result recorded up
/// to and including the failure; in collect mode all checks run and the bag
/// is queried afterwards.
#[derive(Debug)]
pub struct ValueValidator {
    registry: Arc<CheckRegistry>,
    bag: ResultBag,
    throw_on_failure: bool,
}

impl ValueValidator {
    pub fn new(registry: Arc<CheckRegistry>, value: Value) -> Self {
        Self {
            registry,
            bag: ResultBag::new(value, "value", false),
            throw_on_failure: false,
        }
    }

    /// Fail fast: the first failing check raises instead of accumulating.
    pub fn throw_on_failure(mut self) -> Self {
        self.throw_on_failure = true;
        self.bag.set_throw_on_failure(true);
        self
    }

    /// Set the variable name used in rendered messages.
    pub fn var_name(mut self, name: impl Into<String>) -> Self {
        self.bag.set_var_name(name);
        self
    }

    /// Set a display alias; affects rendered messages only, never logic.
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.bag.set_alias(alias);
        self
    }

    /// Look up and run one check against the subject.
    ///
    /// An unknown check name propagates as a configuration error; a failing
    /// check only raises in fail-fast mode.
    pub fn execute_check(
        &mut self,
        name: &str,
        args: &[Value],
    ) -> Result<&mut Self, ValidationError> {
        let result = self
            .registry
            .execute_check(name, self.bag.value(), args)?;
        self.bag.append(result)?;
        Ok(self)
    }

    /// Record a precomputed result as if a check had produced it.
    pub fn record(&mut self, result: AssertionResult) -> Result<&mut Self, ValidationError> {
        self.bag.append(result)?;
        Ok(self)
    }

    /// Normalize an assertion spec and apply its checks in order.
    ///
    /// An optional-flagged bag over a null subject passes vacuously, the
    /// value-side analogue of an absent optional field.
    pub fn assert(&mut self, spec: impl Into<Spec>) -> Result<&mut Self, ValidationError> {
        let bag = parser::normalize(spec)?;
        if bag.is_optional() && self.bag.value().is_null() {
            return Ok(self);
        }
        for assertion in bag.assertions() {
            self.execute_check(assertion.name(), assertion.args())?;
        }
        Ok(self)
    }

    /// Validate nested fields, treating this value as the root container.
    pub fn contains<I, K, S>(&self, rules: I) -> Result<ContainerResultBag, ValidationError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        let mut validator = ContainerValidator::new(self.registry.clone())
            .subject(self.bag.display_name().to_string());
        if self.throw_on_failure {
            validator = validator.throw_on_failure();
        }
        validator.passes(self.bag.value(), rules)
    }

    pub fn success(&self) -> bool {
        self.bag.success()
    }

    pub fn has_errors(&self) -> bool {
        self.bag.has_errors()
    }

    pub fn errors(&self) -> Vec<&AssertionResult> {
        self.bag.errors()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.bag.error_messages()
    }

    pub fn status_messages(&self) -> Vec<String> {
        self.bag.status_messages()
    }

    /// The accumulated result bag.
    pub fn results(&self) -> &ResultBag {
        &self.bag
    }

    /// Raise if any failure was recorded, regardless of mode. Idempotent.
    pub fn or_throw(&self) -> Result<(), ValidationError> {
        self.bag.or_throw()
    }

    /// The subject value when everything passed, the fallback otherwise.
    pub fn value_or(&self, fallback: Value) -> Value {
        if self.bag.success() {
            self.bag.value().clone()
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Arc<CheckRegistry> {
        let mut registry = CheckRegistry::new();
        registry.register("isNaturalNumber", |value, _| {
            if value.as_u64().is_some() {
                AssertionResult::passed("{name} is a natural number")
            } else {
                AssertionResult::failed("{name} must be a natural number, got {value}")
            }
        });
        registry.register("isGreaterThanOrEqual", |value, args| {
            let min = args.first().and_then(Value::as_f64).unwrap_or(f64::MAX);
            match value.as_f64() {
                Some(v) if v >= min => {
                    AssertionResult::passed("{name} >= {min}").with_context("min", min)
                }
                _ => AssertionResult::failed("{name} must be at least {min}")
                    .with_context("min", min),
            }
        });
        registry.register("isString", |value, _| {
            if value.is_string() {
                AssertionResult::passed("{name} is a string")
            } else {
                AssertionResult::failed("{name} must be a string, got {value:type}")
            }
        });
        Arc::new(registry)
    }

    #[test]
    fn test_collect_mode_runs_every_check() {
        let mut validator = ValueValidator::new(registry(), json!(-66.5)).var_name("age");
        validator.execute_check("isNaturalNumber", &[]).unwrap();
        validator
            .execute_check("isGreaterThanOrEqual", &[json!(18)])
            .unwrap();

        assert!(!validator.success());
        assert_eq!(validator.results().failures(), 2);
    }

    #[test]
    fn test_throw_mode_stops_at_first_failure() {
        let mut validator = ValueValidator::new(registry(), json!(-66.5))
            .var_name("age")
            .throw_on_failure();

        let err = validator.execute_check("isNaturalNumber", &[]).unwrap_err();
        match err {
            ValidationError::Failed(failed) => {
                assert_eq!(failed.subject(), "age");
                assert_eq!(failed.results().len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_assert_applies_spec_in_order() {
        let mut validator = ValueValidator::new(registry(), json!("hi")).var_name("greeting");
        validator.assert("isString & isNaturalNumber").unwrap();
        assert_eq!(validator.results().results().len(), 2);
        assert_eq!(validator.results().failures(), 1);
    }

    #[test]
    fn test_assert_optional_null_passes_vacuously() {
        let mut validator = ValueValidator::new(registry(), json!(null));
        validator.assert("optional & isString").unwrap();
        assert!(validator.success());
        assert!(validator.results().results().is_empty());
    }

    #[test]
    fn test_unknown_check_propagates_in_any_mode() {
        let mut validator = ValueValidator::new(registry(), json!(1));
        let err = validator.execute_check("isFoo", &[]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCheck(_)));
    }

    #[test]
    fn test_value_or() {
        let mut validator = ValueValidator::new(registry(), json!(7)).var_name("n");
        validator.execute_check("isNaturalNumber", &[]).unwrap();
        assert_eq!(validator.value_or(json!(0)), json!(7));

        validator.execute_check("isString", &[]).unwrap();
        assert_eq!(validator.value_or(json!(0)), json!(0));
    }

    #[test]
    fn test_or_throw_finalizes_collect_mode() {
        let mut validator = ValueValidator::new(registry(), json!("x")).var_name("field");
        validator.execute_check("isString", &[]).unwrap();
        assert!(validator.or_throw().is_ok());

        validator.execute_check("isNaturalNumber", &[]).unwrap();
        assert!(validator.or_throw().is_err());
    }

    #[test]
    fn test_alias_used_in_messages() {
        let mut validator = ValueValidator::new(registry(), json!(2.5)).var_name("internal");
        validator.alias("your age");
        validator.execute_check("isNaturalNumber", &[]).unwrap();
        assert_eq!(
            validator.error_messages(),
            vec!["your age must be a natural number, got 2.5"]
        );
    }

    #[test]
    fn test_contains_delegates_to_container_validation() {
        let validator = ValueValidator::new(registry(), json!({"name": "ada", "age": 36}));
        let bag = validator
            .contains([("name", "required & isString"), ("age", "required & isNaturalNumber")])
            .unwrap();
        assert!(bag.success());
    }
}
