// Logic combinators: boolean folds over branch outcomes

use crate::container::ContainerValidator;
use crate::errors::ValidationError;
use crate::parser::Spec;
use crate::registry::CheckRegistry;
use crate::result::{AssertionResult, ContainerResultBag};
use crate::value::ValueValidator;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// One operand of a logic combinator.
///
/// A branch is polymorphic over a precomputed result, a reusable assertion
/// spec (applied to the subject value), a nested combinator, or (container
/// mode) a mapping of path globs to specs validated against the subject as
/// a container.
#[derive(Debug, Clone)]
pub enum Branch {
    Result(AssertionResult),
    Spec(Spec),
    Logic(Box<Logic>),
    Fields(Vec<(String, Spec)>),
}

impl Branch {
    /// Build a container-mode branch from path → spec pairs.
    pub fn fields<I, K, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Branch::Fields(
            rules
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }

    fn requires_value(&self) -> bool {
        match self {
            Branch::Result(_) => false,
            Branch::Spec(_) | Branch::Fields(_) => true,
            Branch::Logic(inner) => inner.requires_value(),
        }
    }
}

impl From<AssertionResult> for Branch {
    fn from(result: AssertionResult) -> Self {
        Branch::Result(result)
    }
}

impl From<Spec> for Branch {
    fn from(spec: Spec) -> Self {
        Branch::Spec(spec)
    }
}

impl From<&str> for Branch {
    fn from(expr: &str) -> Self {
        Branch::Spec(Spec::from(expr))
    }
}

impl From<String> for Branch {
    fn from(expr: String) -> Self {
        Branch::Spec(Spec::from(expr))
    }
}

impl From<Logic> for Branch {
    fn from(logic: Logic) -> Self {
        Branch::Logic(Box::new(logic))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogicOp {
    AllOf,
    AnyOf,
    OneOf,
    NoneOf,
    AllOrNone,
    Not,
}

impl LogicOp {
    fn name(self) -> &'static str {
        match self {
            LogicOp::AllOf => "all_of",
            LogicOp::AnyOf => "any_of",
            LogicOp::OneOf => "one_of",
            LogicOp::NoneOf => "none_of",
            LogicOp::AllOrNone => "all_or_none",
            LogicOp::Not => "not",
        }
    }

    fn message(self) -> &'static str {
        match self {
            LogicOp::AllOf => "{name} must pass all of the given assertions",
            LogicOp::AnyOf => "{name} must pass at least one of the given assertions",
            LogicOp::OneOf => "{name} must pass exactly one of the given assertions",
            LogicOp::NoneOf => "{name} must pass none of the given assertions",
            LogicOp::AllOrNone => "{name} must pass all of the given assertions or none of them",
            LogicOp::Not => "{name} must not pass the given assertion",
        }
    }

    fn fold(self, passed: usize, total: usize) -> bool {
        match self {
            LogicOp::AllOf => passed == total,
            LogicOp::AnyOf => passed >= 1,
            LogicOp::OneOf => passed == 1,
            LogicOp::NoneOf | LogicOp::Not => passed == 0,
            LogicOp::AllOrNone => passed == 0 || passed == total,
        }
    }
}

/// Outcome of a combinator: the aggregate result plus one result bag per
/// branch for introspection, irrespective of branch kind.
#[derive(Debug, Clone)]
pub struct LogicOutcome {
    result: AssertionResult,
    branches: Vec<ContainerResultBag>,
}

impl LogicOutcome {
    pub fn success(&self) -> bool {
        self.result.is_success()
    }

    pub fn result(&self) -> &AssertionResult {
        &self.result
    }

    pub fn branches(&self) -> &[ContainerResultBag] {
        &self.branches
    }
}

/// A logic combinator over an ordered sequence of branches.
///
/// Branches evaluate depth-first, left-to-right against the same subject;
/// the per-branch verdicts fold into one aggregate result:
///
/// | combinator | passes when | zero branches |
/// |---|---|---|
/// | `all_of` | every branch passes | passes |
/// | `any_of` | at least one passes | fails |
/// | `one_of` | exactly one passes | fails |
/// | `none_of` / `not_any_of` | none passes | passes |
/// | `all_or_none` | all pass or all fail | passes |
/// | `negate` | its single branch fails | n/a |
#[derive(Debug, Clone)]
pub struct Logic {
    op: LogicOp,
    branches: Vec<Branch>,
    registry: Arc<CheckRegistry>,
}

impl Logic {
    pub fn all_of(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::AllOf, registry, branches)
    }

    pub fn any_of(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::AnyOf, registry, branches)
    }

    pub fn one_of(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::OneOf, registry, branches)
    }

    pub fn none_of(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::NoneOf, registry, branches)
    }

    /// Alias of [`Logic::none_of`].
    pub fn not_any_of(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::NoneOf, registry, branches)
    }

    pub fn all_or_none(registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self::new(LogicOp::AllOrNone, registry, branches)
    }

    /// Wrap exactly one branch; passes iff that branch fails.
    pub fn negate(registry: Arc<CheckRegistry>, branch: Branch) -> Self {
        Self::new(LogicOp::Not, registry, vec![branch])
    }

    fn new(op: LogicOp, registry: Arc<CheckRegistry>, branches: Vec<Branch>) -> Self {
        Self {
            op,
            branches,
            registry,
        }
    }

    /// Whether any branch needs a subject value or container.
    pub fn requires_value(&self) -> bool {
        self.branches.iter().any(Branch::requires_value)
    }

    /// Evaluate every branch against the subject and fold the verdicts.
    ///
    /// A branch needing a subject while none was supplied is a usage error
    /// ([`ValidationError::ValueRequired`]), signaled distinctly from a false
    /// verdict.
    pub fn execute(&self, value: Option<&Value>) -> Result<LogicOutcome, ValidationError> {
        if self.requires_value() && value.is_none() {
            return Err(ValidationError::ValueRequired(self.op.name()));
        }

        let mut branch_bags = Vec::with_capacity(self.branches.len());
        for branch in &self.branches {
            branch_bags.push(self.run_branch(branch, value)?);
        }

        let total = branch_bags.len();
        let passed = branch_bags.iter().filter(|bag| bag.success()).count();
        let success = self.op.fold(passed, total);
        debug!(
            target: "palisade::logic",
            "{}: {passed}/{total} branch(es) passed -> {}",
            self.op.name(),
            success
        );

        let result = if success {
            AssertionResult::passed(self.op.message())
        } else {
            AssertionResult::failed(self.op.message())
        };
        let result = result
            .with_context("passed", passed)
            .with_context("total", total);

        Ok(LogicOutcome {
            result,
            branches: branch_bags,
        })
    }

    fn run_branch(
        &self,
        branch: &Branch,
        value: Option<&Value>,
    ) -> Result<ContainerResultBag, ValidationError> {
        match branch {
            Branch::Result(result) => {
                let mut bag = ContainerResultBag::new();
                bag.record("", value.unwrap_or(&Value::Null), result.clone());
                Ok(bag)
            }
            Branch::Spec(spec) => {
                let Some(subject) = value else {
                    return Err(ValidationError::ValueRequired(self.op.name()));
                };
                let mut validator = ValueValidator::new(self.registry.clone(), subject.clone());
                validator.assert(spec.clone())?;
                let mut bag = ContainerResultBag::new();
                bag.merge("", validator.results());
                Ok(bag)
            }
            Branch::Logic(inner) => {
                let outcome = inner.execute(value)?;
                let mut bag = ContainerResultBag::new();
                bag.record("", value.unwrap_or(&Value::Null), outcome.result);
                Ok(bag)
            }
            Branch::Fields(rules) => {
                let Some(subject) = value else {
                    return Err(ValidationError::ValueRequired(self.op.name()));
                };
                ContainerValidator::new(self.registry.clone()).passes(
                    subject,
                    rules.iter().map(|(path, spec)| (path.clone(), spec.clone())),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Arc<CheckRegistry> {
        let mut registry = CheckRegistry::new();
        registry.register("containsString", |value, args| {
            let needle = args.first().and_then(Value::as_str).unwrap_or_default();
            match value.as_str() {
                Some(s) if s.contains(needle) => {
                    AssertionResult::passed("{name} contains {needle}")
                        .with_context("needle", needle)
                }
                _ => AssertionResult::failed("{name} must contain {needle}")
                    .with_context("needle", needle),
            }
        });
        registry.register("isString", |value, _| {
            if value.is_string() {
                AssertionResult::passed("{name} is a string")
            } else {
                AssertionResult::failed("{name} must be a string")
            }
        });
        Arc::new(registry)
    }

    fn verdicts(outcomes: &[bool]) -> Vec<Branch> {
        outcomes
            .iter()
            .map(|&ok| {
                Branch::from(if ok {
                    AssertionResult::passed("ok")
                } else {
                    AssertionResult::failed("bad")
                })
            })
            .collect()
    }

    #[test]
    fn test_zero_branch_behavior() {
        let r = registry();
        assert!(Logic::all_of(r.clone(), vec![]).execute(None).unwrap().success());
        assert!(!Logic::any_of(r.clone(), vec![]).execute(None).unwrap().success());
        assert!(!Logic::one_of(r.clone(), vec![]).execute(None).unwrap().success());
        assert!(Logic::none_of(r.clone(), vec![]).execute(None).unwrap().success());
        assert!(Logic::all_or_none(r, vec![]).execute(None).unwrap().success());
    }

    #[test]
    fn test_one_of_exactness() {
        let r = registry();
        let outcome = Logic::one_of(r.clone(), verdicts(&[true, true, false]))
            .execute(None)
            .unwrap();
        assert!(!outcome.success());

        let outcome = Logic::one_of(r, verdicts(&[true, false, false]))
            .execute(None)
            .unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn test_all_or_none_rejects_mixed() {
        let r = registry();
        let branches = || {
            vec![
                Branch::from("containsString(\"a\")"),
                Branch::from("containsString(\"b\")"),
            ]
        };

        // Subject "a": one branch passes, one fails.
        let outcome = Logic::all_or_none(r.clone(), branches())
            .execute(Some(&json!("a")))
            .unwrap();
        assert!(!outcome.success());

        // Subject "ab": both pass.
        let outcome = Logic::all_or_none(r.clone(), branches())
            .execute(Some(&json!("ab")))
            .unwrap();
        assert!(outcome.success());

        // Subject "z": both fail.
        let outcome = Logic::all_or_none(r, branches())
            .execute(Some(&json!("z")))
            .unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn test_not_inverts_single_branch() {
        let r = registry();
        let outcome = Logic::negate(r.clone(), Branch::from("isString"))
            .execute(Some(&json!(42)))
            .unwrap();
        assert!(outcome.success());

        let outcome = Logic::negate(r, Branch::from("isString"))
            .execute(Some(&json!("text")))
            .unwrap();
        assert!(!outcome.success());
    }

    #[test]
    fn test_not_any_of_aliases_none_of() {
        let r = registry();
        let outcome = Logic::not_any_of(r, verdicts(&[false, false]))
            .execute(None)
            .unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn test_value_required_is_distinct() {
        let r = registry();
        let err = Logic::any_of(r, vec![Branch::from("isString")])
            .execute(None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::ValueRequired("any_of")));
    }

    #[test]
    fn test_precomputed_branches_need_no_value() {
        let r = registry();
        let logic = Logic::all_of(r, verdicts(&[true, true]));
        assert!(!logic.requires_value());
        assert!(logic.execute(None).unwrap().success());
    }

    #[test]
    fn test_nested_combinators() {
        let r = registry();
        // not(containsString("x")) AND (containsString("a") OR containsString("b"))
        let logic = Logic::all_of(
            r.clone(),
            vec![
                Branch::from(Logic::negate(r.clone(), Branch::from("containsString(\"x\")"))),
                Branch::from(Logic::any_of(
                    r,
                    vec![
                        Branch::from("containsString(\"a\")"),
                        Branch::from("containsString(\"b\")"),
                    ],
                )),
            ],
        );

        assert!(logic.execute(Some(&json!("cab"))).unwrap().success());
        assert!(!logic.execute(Some(&json!("xab"))).unwrap().success());
        assert!(!logic.execute(Some(&json!("c"))).unwrap().success());
    }

    #[test]
    fn test_fields_branch_collapses_container_outcome() {
        let r = registry();
        let logic = Logic::any_of(
            r,
            vec![
                Branch::fields([("name", "required & isString")]),
                Branch::fields([("title", "required & isString")]),
            ],
        );

        let outcome = logic.execute(Some(&json!({"name": "ada"}))).unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.branches().len(), 2);
        assert!(outcome.branches()[0].success());
        assert!(!outcome.branches()[1].success());
    }

    #[test]
    fn test_branch_bags_expose_per_branch_results() {
        let r = registry();
        let outcome = Logic::all_of(r, verdicts(&[true, false]))
            .execute(None)
            .unwrap();
        assert!(!outcome.success());
        assert!(outcome.branches()[0].success());
        assert!(outcome.branches()[1].has_errors());
        assert_eq!(outcome.result().context()["passed"], json!(1));
        assert_eq!(outcome.result().context()["total"], json!(2));
    }
}
