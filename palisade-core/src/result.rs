// Result model: per-assertion results and the value/container result bags

use crate::errors::{FailedValidation, ValidationError};
use crate::template;
use indexmap::IndexMap;
use serde_json::Value;

/// Outcome of one assertion: a pass/fail flag, a renderable message template
/// and the context values the template substitutes.
///
/// Immutable once built; [`AssertionResult::with_path`] derives a copy tagged
/// with the field path it was recorded at (container validation only).
#[derive(Debug, Clone)]
pub struct AssertionResult {
    success: bool,
    message: String,
    context: IndexMap<String, Value>,
    path: Option<String>,
}

impl AssertionResult {
    /// Create a passing result with the given message template.
    pub fn passed(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    /// Create a failing result with the given message template.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            context: IndexMap::new(),
            path: None,
        }
    }

    /// Add a context value for template substitution.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Derive a copy carrying a field-path annotation.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.path = Some(path.into());
        copy
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &IndexMap<String, Value> {
        &self.context
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Render the message template against a display name and subject value.
    ///
    /// A non-empty path annotation takes precedence over `var_name` so
    /// container results always render with their field path.
    pub fn normalize(&self, var_name: &str, value: &Value) -> String {
        let name = match self.path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => var_name,
        };
        template::render(&self.message, name, value, &self.context)
    }
}

/// Ordered results for one validated value.
///
/// Appending mutates the bag during a single validation run; the bag is never
/// shared across runs. With `throw_on_failure` set, the first failing append
/// surfaces a [`ValidationError::Failed`] carrying everything recorded so
/// far, the failing result included.
#[derive(Debug, Clone)]
pub struct ResultBag {
    results: Vec<AssertionResult>,
    successes: usize,
    failures: usize,
    value: Value,
    var_name: String,
    alias: Option<String>,
    throw_on_failure: bool,
}

impl ResultBag {
    pub fn new(value: Value, var_name: impl Into<String>, throw_on_failure: bool) -> Self {
        Self {
            results: Vec::new(),
            successes: 0,
            failures: 0,
            value,
            var_name: var_name.into(),
            alias: None,
            throw_on_failure,
        }
    }

    /// Display name used in rendered messages: the alias when set.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.var_name)
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    pub(crate) fn set_var_name(&mut self, name: impl Into<String>) {
        self.var_name = name.into();
    }

    pub(crate) fn set_throw_on_failure(&mut self, throw_on_failure: bool) {
        self.throw_on_failure = throw_on_failure;
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Append a result, updating the counters.
    ///
    /// In fail-fast mode a failing result is recorded first and then raised,
    /// so the error payload and the bag agree on what happened.
    pub fn append(&mut self, result: AssertionResult) -> Result<(), ValidationError> {
        let failed = !result.is_success();
        if failed {
            self.failures += 1;
        } else {
            self.successes += 1;
        }
        self.results.push(result);

        if failed && self.throw_on_failure {
            return Err(self.failed_validation().into());
        }
        Ok(())
    }

    pub fn success(&self) -> bool {
        self.failures == 0
    }

    pub fn has_errors(&self) -> bool {
        self.failures > 0
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    /// The failing results, in execution order.
    pub fn errors(&self) -> Vec<&AssertionResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    /// Rendered messages of the failing results.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors()
            .into_iter()
            .map(|r| r.normalize(self.display_name(), &self.value))
            .collect()
    }

    /// Rendered messages of every result, passed and failed alike.
    pub fn status_messages(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| r.normalize(self.display_name(), &self.value))
            .collect()
    }

    /// Raise if any failure was recorded; a no-op otherwise. Idempotent, and
    /// independent of the fail-fast flag.
    pub fn or_throw(&self) -> Result<(), ValidationError> {
        if self.has_errors() {
            return Err(self.failed_validation().into());
        }
        Ok(())
    }

    fn failed_validation(&self) -> FailedValidation {
        FailedValidation::new(
            self.display_name(),
            self.results.clone(),
            self.error_messages(),
        )
    }
}

/// Flattened results for one container, tagged with slash-separated field
/// paths. Built by merging per-field [`ResultBag`]s; the subject value seen
/// at each path is kept so messages can still render `{value}`.
#[derive(Debug, Clone, Default)]
pub struct ContainerResultBag {
    results: Vec<AssertionResult>,
    values: IndexMap<String, Value>,
}

impl ContainerResultBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one result at a path.
    pub fn record(&mut self, path: &str, value: &Value, result: AssertionResult) {
        self.values
            .entry(path.to_string())
            .or_insert_with(|| value.clone());
        self.results.push(result.with_path(path));
    }

    /// Merge a per-field bag, tagging every result with the field path.
    pub fn merge(&mut self, path: &str, bag: &ResultBag) {
        self.values
            .entry(path.to_string())
            .or_insert_with(|| bag.value().clone());
        for result in bag.results() {
            self.results.push(result.with_path(path));
        }
    }

    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    pub fn has_errors(&self) -> bool {
        !self.success()
    }

    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    /// Results recorded at an exact path.
    pub fn results_at(&self, path: &str) -> Vec<&AssertionResult> {
        self.results
            .iter()
            .filter(|r| r.path() == Some(path))
            .collect()
    }

    pub fn errors(&self) -> Vec<&AssertionResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    pub fn errors_at(&self, path: &str) -> Vec<&AssertionResult> {
        self.results
            .iter()
            .filter(|r| !r.is_success() && r.path() == Some(path))
            .collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors().into_iter().map(|r| self.render(r)).collect()
    }

    pub fn error_messages_at(&self, path: &str) -> Vec<String> {
        self.errors_at(path)
            .into_iter()
            .map(|r| self.render(r))
            .collect()
    }

    pub fn status_messages(&self) -> Vec<String> {
        self.results.iter().map(|r| self.render(r)).collect()
    }

    pub fn status_messages_at(&self, path: &str) -> Vec<String> {
        self.results_at(path)
            .into_iter()
            .map(|r| self.render(r))
            .collect()
    }

    /// Raise one aggregate error referencing the whole bag if any field
    /// failed. Idempotent.
    pub fn or_throw(&self, subject: &str) -> Result<(), ValidationError> {
        if self.has_errors() {
            return Err(FailedValidation::new(
                subject,
                self.results.clone(),
                self.error_messages(),
            )
            .into());
        }
        Ok(())
    }

    /// JSON export of the failing results.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "errors": self
                .errors()
                .into_iter()
                .map(|r| {
                    serde_json::json!({
                        "path": r.path(),
                        "message": self.render(r),
                    })
                })
                .collect::<Vec<_>>()
        })
    }

    fn render(&self, result: &AssertionResult) -> String {
        let value = result
            .path()
            .and_then(|p| self.values.get(p))
            .unwrap_or(&Value::Null);
        result.normalize("value", value)
    }
}
