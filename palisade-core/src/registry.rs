// Check registry: name -> predicate lookup and invocation

use crate::errors::ValidationError;
use crate::result::AssertionResult;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered check: a pure predicate over a subject value and the
/// assertion's arguments. Checks must be side-effect-free and terminate
/// quickly; they run synchronously on the validating thread.
pub type CheckFn = Arc<dyn Fn(&Value, &[Value]) -> AssertionResult + Send + Sync>;

/// Lookup from check name to predicate.
///
/// Names are matched case-insensitively. Registration happens before any
/// validation begins; during validation the registry is read-only and safe
/// to share across independent runs behind an `Arc`. Validators receive the
/// registry at construction; there is no implicit global inside the engine
/// (the default catalog crate exposes a process-wide instance at the
/// composition boundary).
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, CheckFn>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check under a name, replacing any previous registration.
    pub fn register<F>(&mut self, name: &str, check: F)
    where
        F: Fn(&Value, &[Value]) -> AssertionResult + Send + Sync + 'static,
    {
        self.checks
            .insert(name.to_ascii_lowercase(), Arc::new(check));
    }

    pub fn has_check(&self, name: &str) -> bool {
        self.checks.contains_key(&name.to_ascii_lowercase())
    }

    /// Execute a check against a value.
    ///
    /// An unknown name is a configuration error, distinct from a failing
    /// check, and propagates immediately.
    pub fn execute_check(
        &self,
        name: &str,
        value: &Value,
        args: &[Value],
    ) -> Result<AssertionResult, ValidationError> {
        let check = self
            .checks
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ValidationError::UnknownCheck(name.to_string()))?;
        let result = check(value, args);
        debug!(
            target: "palisade::checks",
            "check `{name}` -> {}",
            if result.is_success() { "pass" } else { "fail" }
        );
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.checks.keys().collect::<Vec<_>>())
            .finish()
    }
}
