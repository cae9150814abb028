// Container validator: applies path-keyed assertion specs to nested data

use crate::adapter::ValidationData;
use crate::errors::ValidationError;
use crate::flattened::FlattenedContainer;
use crate::parser::{self, Spec};
use crate::registry::CheckRegistry;
use crate::result::{AssertionResult, ContainerResultBag};
use crate::value::ValueValidator;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

const PRESENCE_MESSAGE: &str = "{name} must be present";

/// Validates a nested container against an ordered mapping of path glob →
/// assertion spec.
///
/// Every glob is resolved through the [`FlattenedContainer`]; each concrete
/// match gets a fresh per-field validator whose first failure stops that
/// field's remaining checks while other fields continue. In fail-fast mode
/// one aggregate error referencing the whole result bag is raised at the
/// end, never per-field errors.
#[derive(Debug, Clone)]
pub struct ContainerValidator {
    registry: Arc<CheckRegistry>,
    throw_on_failure: bool,
    subject: String,
}

impl ContainerValidator {
    pub fn new(registry: Arc<CheckRegistry>) -> Self {
        Self {
            registry,
            throw_on_failure: false,
            subject: "container".to_string(),
        }
    }

    /// Raise one aggregate error at the end when any field failed.
    pub fn throw_on_failure(mut self) -> Self {
        self.throw_on_failure = true;
        self
    }

    /// Set the subject name used by the aggregate error.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Validate the container, producing one flattened result bag.
    ///
    /// Rules apply in input order. A glob resolving to nothing records one
    /// synthetic result at the glob path itself: a pass when the spec is
    /// optional, a "must be present" failure otherwise.
    pub fn passes<D, I, K, S>(
        &self,
        data: &D,
        rules: I,
    ) -> Result<ContainerResultBag, ValidationError>
    where
        D: ValidationData + ?Sized,
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        let container = FlattenedContainer::from_data(data)?;
        let mut out = ContainerResultBag::new();

        for (glob, spec) in rules {
            let glob = glob.into();
            let bag = parser::normalize(spec)?;
            let found = container.find(&glob);
            debug!(
                target: "palisade::container",
                "rule `{glob}`: {} concrete path(s), {} assertion(s)",
                found.len(),
                bag.len()
            );

            if found.is_empty() {
                let result = if bag.is_optional() {
                    AssertionResult::passed(PRESENCE_MESSAGE)
                } else {
                    AssertionResult::failed(PRESENCE_MESSAGE)
                };
                out.record(&glob, &Value::Null, result);
                continue;
            }

            for (path, value) in found {
                // Per-field fail-fast: the raised error is only a stop
                // signal here, the field's bag already holds the failure.
                let mut validator = ValueValidator::new(self.registry.clone(), value)
                    .var_name(&path)
                    .throw_on_failure();
                if bag.requires_presence() {
                    validator.record(AssertionResult::passed(PRESENCE_MESSAGE))?;
                }
                for assertion in bag.assertions() {
                    match validator.execute_check(assertion.name(), assertion.args()) {
                        Ok(_) => {}
                        Err(ValidationError::Failed(_)) => break,
                        Err(other) => return Err(other),
                    }
                }
                out.merge(&path, validator.results());
            }
        }

        if self.throw_on_failure {
            out.or_throw(&self.subject)?;
        }
        Ok(out)
    }
}
