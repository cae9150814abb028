// Assertion-expression parser and spec normalizer

use crate::assertion::{Assertion, AssertionBag};
use crate::errors::ValidationError;
use log::debug;
use serde_json::Value;

/// An assertion spec in one of the accepted source shapes.
///
/// Strings use the expression mini-language (`"required & isString &
/// longerThan(4)"`), sequences flatten recursively, JSON values cover the
/// mapping/sequence forms, and a pre-built [`AssertionBag`] passes through
/// unchanged.
#[derive(Debug, Clone)]
pub enum Spec {
    Expr(String),
    List(Vec<Spec>),
    Json(Value),
    Bag(AssertionBag),
}

impl From<&str> for Spec {
    fn from(expr: &str) -> Self {
        Spec::Expr(expr.to_string())
    }
}

impl From<String> for Spec {
    fn from(expr: String) -> Self {
        Spec::Expr(expr)
    }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        Spec::Json(value)
    }
}

impl From<&Value> for Spec {
    fn from(value: &Value) -> Self {
        Spec::Json(value.clone())
    }
}

impl From<AssertionBag> for Spec {
    fn from(bag: AssertionBag) -> Self {
        Spec::Bag(bag)
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(specs: Vec<Spec>) -> Self {
        Spec::List(specs)
    }
}

/// Normalize an assertion spec into a canonical [`AssertionBag`].
///
/// Pure: the only effect of malformed input is the returned
/// [`ValidationError::Parse`]. Token order is preserved left-to-right, which
/// governs execution order and, in fail-fast mode, which check fails first.
pub fn normalize(spec: impl Into<Spec>) -> Result<AssertionBag, ValidationError> {
    let mut bag = AssertionBag::new();
    apply_spec(&mut bag, &spec.into())?;
    debug!(
        target: "palisade::parser",
        "normalized spec into {} assertion(s), optional={:?}",
        bag.len(),
        bag.optional_flag()
    );
    Ok(bag)
}

fn apply_spec(bag: &mut AssertionBag, spec: &Spec) -> Result<(), ValidationError> {
    match spec {
        Spec::Expr(expr) => apply_expression(bag, expr),
        Spec::List(specs) => {
            for spec in specs {
                apply_spec(bag, spec)?;
            }
            Ok(())
        }
        Spec::Json(value) => apply_json(bag, value),
        Spec::Bag(prebuilt) => {
            for assertion in prebuilt.assertions() {
                bag.push(assertion.clone());
            }
            if let Some(optional) = prebuilt.optional_flag() {
                bag.set_optional(optional)?;
            }
            Ok(())
        }
    }
}

fn apply_expression(bag: &mut AssertionBag, expr: &str) -> Result<(), ValidationError> {
    for token in split_expression(expr)? {
        let (name, args) = parse_token(&token)?;
        apply_named(bag, &name, args)?;
    }
    Ok(())
}

fn apply_json(bag: &mut AssertionBag, value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(expr) => apply_expression(bag, expr),
        Value::Array(entries) => {
            for entry in entries {
                match entry {
                    Value::String(expr) => apply_expression(bag, expr)?,
                    Value::Array(parts) => {
                        let name = parts.first().and_then(Value::as_str).ok_or_else(|| {
                            ValidationError::Parse(
                                "sequence assertion entry must start with a check name"
                                    .to_string(),
                            )
                        })?;
                        apply_named(bag, name, parts[1..].to_vec())?;
                    }
                    Value::Object(_) => apply_json(bag, entry)?,
                    other => {
                        return Err(ValidationError::Parse(format!(
                            "unsupported assertion entry: {other}"
                        )));
                    }
                }
            }
            Ok(())
        }
        Value::Object(entries) => {
            for (name, args) in entries {
                let args = match args {
                    Value::Null => Vec::new(),
                    Value::Array(list) => list.clone(),
                    scalar => vec![scalar.clone()],
                };
                apply_named(bag, name, args)?;
            }
            Ok(())
        }
        other => Err(ValidationError::Parse(format!(
            "unsupported assertion spec shape: {other}"
        ))),
    }
}

fn apply_named(
    bag: &mut AssertionBag,
    name: &str,
    args: Vec<Value>,
) -> Result<(), ValidationError> {
    if name.eq_ignore_ascii_case("required") || name.eq_ignore_ascii_case("optional") {
        let enabled = match args.as_slice() {
            [] => true,
            [Value::Bool(b)] => *b,
            _ => {
                return Err(ValidationError::Parse(format!(
                    "`{name}` takes at most one boolean argument"
                )));
            }
        };
        let optional = if name.eq_ignore_ascii_case("optional") {
            enabled
        } else {
            !enabled
        };
        return bag.set_optional(optional);
    }
    bag.push(Assertion::new(name, args)?);
    Ok(())
}

/// Split an expression on top-level `&`, honoring the `&&` escape (a literal
/// ampersand, recognized only outside parentheses) and leaving everything
/// inside parentheses or string literals untouched.
fn split_expression(expr: &str) -> Result<Vec<String>, ValidationError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_string => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            '(' if !in_string => {
                depth += 1;
                current.push(c);
            }
            ')' if !in_string => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '&' if !in_string && depth == 0 => {
                if chars.peek() == Some(&'&') {
                    chars.next();
                    current.push('&');
                } else {
                    push_token(&mut tokens, &mut current, expr)?;
                }
            }
            _ => current.push(c),
        }
    }

    if !tokens.is_empty() || !current.trim().is_empty() {
        push_token(&mut tokens, &mut current, expr)?;
    }
    Ok(tokens)
}

fn push_token(
    tokens: &mut Vec<String>,
    current: &mut String,
    expr: &str,
) -> Result<(), ValidationError> {
    let token = current.trim().to_string();
    if token.is_empty() {
        return Err(ValidationError::Parse(format!(
            "empty assertion token in `{expr}`"
        )));
    }
    tokens.push(token);
    current.clear();
    Ok(())
}

/// Parse one `name(args...)` token. The parenthesized payload is a JSON
/// array body; no parentheses means zero arguments.
fn parse_token(token: &str) -> Result<(String, Vec<Value>), ValidationError> {
    let Some(open) = token.find('(') else {
        return Ok((token.to_string(), Vec::new()));
    };
    if !token.ends_with(')') {
        return Err(ValidationError::Parse(format!(
            "malformed assertion token `{token}`"
        )));
    }
    let name = token[..open].trim_end().to_string();
    let body = &token[open + 1..token.len() - 1];
    if body.trim().is_empty() {
        return Ok((name, Vec::new()));
    }
    let args: Vec<Value> = serde_json::from_str(&format!("[{body}]")).map_err(|e| {
        ValidationError::Parse(format!("malformed arguments in `{token}`: {e}"))
    })?;
    Ok((name, args))
}
