// Error types for the validation engine

use crate::result::AssertionResult;
use thiserror::Error;

/// Errors raised by the validation engine.
///
/// Only the first four variants indicate caller or configuration mistakes and
/// propagate immediately. A check that ran and returned `false` is *not* an
/// error; it is recorded in the result model and only surfaces as
/// [`ValidationError::Failed`] when a throw boundary is crossed (a validator
/// in fail-fast mode, or an explicit `or_throw()` call).
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid assertion spec: {0}")]
    Parse(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("{0} requires a subject value, but none was supplied")]
    ValueRequired(&'static str),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Failed(#[from] FailedValidation),
}

/// Payload of a failed validation raised at a throw boundary.
///
/// Carries every result accumulated up to and including the failure, so a
/// caller catching the error can still inspect the full run. The `Display`
/// impl is a one-line summary; [`FailedValidation::details`] renders the
/// failing messages as a bulleted list.
#[derive(Error, Debug, Clone)]
#[error("validation of `{subject}` failed")]
pub struct FailedValidation {
    subject: String,
    results: Vec<AssertionResult>,
    messages: Vec<String>,
}

impl FailedValidation {
    pub fn new(
        subject: impl Into<String>,
        results: Vec<AssertionResult>,
        messages: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            results,
            messages,
        }
    }

    /// Display name of the failed subject (variable name, alias, or container).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// All results accumulated up to and including the first failure.
    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    /// Rendered messages of the failing results.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Multi-line diagnostic: the summary followed by one bullet per failure.
    pub fn details(&self) -> String {
        let mut out = format!("{self}");
        for message in &self.messages {
            out.push_str("\n - ");
            out.push_str(message);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_summary() {
        let failed = FailedValidation::new("age", Vec::new(), Vec::new());
        assert_eq!(failed.to_string(), "validation of `age` failed");
    }

    #[test]
    fn test_details_lists_failures() {
        let failed = FailedValidation::new(
            "age",
            Vec::new(),
            vec![
                "age must be a natural number".to_string(),
                "age must be at least 18".to_string(),
            ],
        );
        let details = failed.details();
        assert!(details.starts_with("validation of `age` failed"));
        assert!(details.contains("\n - age must be a natural number"));
        assert!(details.contains("\n - age must be at least 18"));
    }

    #[test]
    fn test_error_variants_are_distinct() {
        let unknown = ValidationError::UnknownCheck("isFoo".to_string());
        assert_eq!(unknown.to_string(), "unknown check: isFoo");

        let missing = ValidationError::ValueRequired("one_of");
        assert_eq!(
            missing.to_string(),
            "one_of requires a subject value, but none was supplied"
        );
    }
}
