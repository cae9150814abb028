// Assertion model: a named check with arguments, and the ordered bag

use crate::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").unwrap());

/// One named check plus its arguments, e.g. `greaterThan(18)`.
///
/// Immutable once parsed. The name must match the check identifier pattern
/// (a letter followed by letters/digits); construction fails otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    name: String,
    args: Vec<Value>,
}

impl Assertion {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !IDENTIFIER_REGEX.is_match(&name) {
            return Err(ValidationError::Parse(format!(
                "`{name}` is not a valid check name"
            )));
        }
        Ok(Self { name, args })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Ordered list of assertions plus the presence flag.
///
/// The flag is tri-state: `None` is neutral (a field is required by
/// default), the `optional` pseudo-token sets `Some(true)` and `required`
/// explicitly confirms the default with `Some(false)`. Contradictory
/// settings conflict at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssertionBag {
    assertions: Vec<Assertion>,
    optional: Option<bool>,
}

impl AssertionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// Set the presence flag; conflicting values are a parse error.
    pub fn set_optional(&mut self, optional: bool) -> Result<(), ValidationError> {
        match self.optional {
            Some(current) if current != optional => Err(ValidationError::Parse(
                "conflicting `required` and `optional` flags in assertion spec".to_string(),
            )),
            _ => {
                self.optional = Some(optional);
                Ok(())
            }
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional == Some(true)
    }

    /// Whether the subject must be present. True unless `optional` was set.
    pub fn requires_presence(&self) -> bool {
        !self.is_optional()
    }

    /// The raw tri-state flag; `None` means neither pseudo-token appeared.
    pub fn optional_flag(&self) -> Option<bool> {
        self.optional
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assertion_name_pattern() {
        assert!(Assertion::new("isString", vec![]).is_ok());
        assert!(Assertion::new("longerThan", vec![json!(4)]).is_ok());
        assert!(Assertion::new("is-string", vec![]).is_err());
        assert!(Assertion::new("9lives", vec![]).is_err());
        assert!(Assertion::new("", vec![]).is_err());
    }

    #[test]
    fn test_presence_flag_defaults_to_required() {
        let bag = AssertionBag::new();
        assert!(!bag.is_optional());
        assert!(bag.requires_presence());
        assert_eq!(bag.optional_flag(), None);
    }

    #[test]
    fn test_optional_flips_required_confirms() {
        let mut bag = AssertionBag::new();
        bag.set_optional(true).unwrap();
        assert!(bag.is_optional());

        let mut bag = AssertionBag::new();
        bag.set_optional(false).unwrap();
        assert!(!bag.is_optional());
        assert_eq!(bag.optional_flag(), Some(false));
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        let mut bag = AssertionBag::new();
        bag.set_optional(true).unwrap();
        assert!(bag.set_optional(false).is_err());
        // Re-setting the same value is fine.
        assert!(bag.set_optional(true).is_ok());
    }

    #[test]
    fn test_order_preserved() {
        let mut bag = AssertionBag::new();
        bag.push(Assertion::new("isString", vec![]).unwrap());
        bag.push(Assertion::new("longerThan", vec![json!(4)]).unwrap());
        let names: Vec<_> = bag.assertions().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["isString", "longerThan"]);
    }
}
