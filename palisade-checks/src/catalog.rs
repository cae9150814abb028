// Built-in checks

use once_cell::sync::Lazy;
use palisade_core::AssertionResult;
use regex::Regex;
use serde_json::Value;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

fn verdict(success: bool, message: &str) -> AssertionResult {
    if success {
        AssertionResult::passed(message)
    } else {
        AssertionResult::failed(message)
    }
}

fn bad_args(check: &str, expects: &str) -> AssertionResult {
    AssertionResult::failed(format!("{check} expects {expects}"))
}

// Type checks

pub fn is_string(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(value.is_string(), "{name} must be a string, got {value:type}")
}

pub fn is_integer(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_i64().is_some() || value.as_u64().is_some();
    verdict(ok, "{name} must be an integer, got {value:type}")
}

pub fn is_float(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_number().is_some_and(|n| n.is_f64());
    verdict(ok, "{name} must be a float, got {value:type}")
}

/// Numbers, plus strings that parse as numbers.
pub fn is_numeric(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    };
    verdict(ok, "{name} must be numeric, got {value}")
}

pub fn is_boolean(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(value.is_boolean(), "{name} must be a boolean, got {value:type}")
}

pub fn is_array(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(value.is_array(), "{name} must be an array, got {value:type}")
}

pub fn is_object(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(value.is_object(), "{name} must be an object, got {value:type}")
}

pub fn is_null(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(value.is_null(), "{name} must be null, got {value:type}")
}

/// Non-blank strings, non-empty collections; null is always empty.
pub fn not_empty(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Null => false,
        _ => true,
    };
    verdict(ok, "{name} must not be empty")
}

// String checks

pub fn longer_than(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(min) = args.first().and_then(Value::as_u64) else {
        return bad_args("longerThan", "an integer length argument");
    };
    let ok = value
        .as_str()
        .is_some_and(|s| s.chars().count() as u64 > min);
    verdict(ok, "{name} must be a string longer than {min} characters").with_context("min", min)
}

pub fn shorter_than(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(max) = args.first().and_then(Value::as_u64) else {
        return bad_args("shorterThan", "an integer length argument");
    };
    let ok = value
        .as_str()
        .is_some_and(|s| (s.chars().count() as u64) < max);
    verdict(ok, "{name} must be a string shorter than {max} characters").with_context("max", max)
}

pub fn length_between(value: &Value, args: &[Value]) -> AssertionResult {
    let (Some(min), Some(max)) = (
        args.first().and_then(Value::as_u64),
        args.get(1).and_then(Value::as_u64),
    ) else {
        return bad_args("lengthBetween", "two integer length arguments");
    };
    let ok = value
        .as_str()
        .is_some_and(|s| (min..=max).contains(&(s.chars().count() as u64)));
    verdict(ok, "{name} must be between {min} and {max} characters long")
        .with_context("min", min)
        .with_context("max", max)
}

pub fn contains_string(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(needle) = args.first().and_then(Value::as_str) else {
        return bad_args("containsString", "a string argument");
    };
    let ok = value.as_str().is_some_and(|s| s.contains(needle));
    verdict(ok, "{name} must contain {needle}").with_context("needle", needle)
}

pub fn starts_with(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(prefix) = args.first().and_then(Value::as_str) else {
        return bad_args("startsWith", "a string argument");
    };
    let ok = value.as_str().is_some_and(|s| s.starts_with(prefix));
    verdict(ok, "{name} must start with {prefix}").with_context("prefix", prefix)
}

pub fn ends_with(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(suffix) = args.first().and_then(Value::as_str) else {
        return bad_args("endsWith", "a string argument");
    };
    let ok = value.as_str().is_some_and(|s| s.ends_with(suffix));
    verdict(ok, "{name} must end with {suffix}").with_context("suffix", suffix)
}

pub fn matches_regex(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(pattern) = args.first().and_then(Value::as_str) else {
        return bad_args("matchesRegex", "a pattern argument");
    };
    let Ok(regex) = Regex::new(pattern) else {
        return bad_args("matchesRegex", "a valid pattern argument");
    };
    let ok = value.as_str().is_some_and(|s| regex.is_match(s));
    verdict(ok, "{name} must match {pattern}").with_context("pattern", pattern)
}

pub fn is_email(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s));
    verdict(ok, "{name} must be a valid email address")
}

pub fn is_url(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_str().is_some_and(|s| URL_REGEX.is_match(s));
    verdict(ok, "{name} must be a valid URL")
}

pub fn is_uuid(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value
        .as_str()
        .is_some_and(|s| UUID_REGEX.is_match(&s.to_ascii_lowercase()));
    verdict(ok, "{name} must be a valid UUID")
}

pub fn is_alpha(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_str().is_some_and(|s| ALPHA_REGEX.is_match(s));
    verdict(ok, "{name} must contain only letters")
}

pub fn is_alphanumeric(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value
        .as_str()
        .is_some_and(|s| ALPHANUMERIC_REGEX.is_match(s));
    verdict(ok, "{name} must contain only letters and digits")
}

pub fn is_digits(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_str().is_some_and(|s| DIGITS_REGEX.is_match(s));
    verdict(ok, "{name} must contain only digits")
}

// Numeric checks

fn compare(
    check: &str,
    value: &Value,
    args: &[Value],
    message: &'static str,
    cmp: fn(f64, f64) -> bool,
) -> AssertionResult {
    let Some(bound) = args.first().and_then(Value::as_f64) else {
        return bad_args(check, "a numeric argument");
    };
    let ok = value.as_f64().is_some_and(|v| cmp(v, bound));
    // Context keeps the argument as written so `18` renders as `18`, not `18.0`.
    verdict(ok, message).with_context("bound", args[0].clone())
}

pub fn is_greater_than(value: &Value, args: &[Value]) -> AssertionResult {
    compare(
        "isGreaterThan",
        value,
        args,
        "{name} must be greater than {bound}",
        |v, b| v > b,
    )
}

pub fn is_greater_than_or_equal(value: &Value, args: &[Value]) -> AssertionResult {
    compare(
        "isGreaterThanOrEqual",
        value,
        args,
        "{name} must be at least {bound}",
        |v, b| v >= b,
    )
}

pub fn is_less_than(value: &Value, args: &[Value]) -> AssertionResult {
    compare(
        "isLessThan",
        value,
        args,
        "{name} must be less than {bound}",
        |v, b| v < b,
    )
}

pub fn is_less_than_or_equal(value: &Value, args: &[Value]) -> AssertionResult {
    compare(
        "isLessThanOrEqual",
        value,
        args,
        "{name} must be at most {bound}",
        |v, b| v <= b,
    )
}

pub fn between(value: &Value, args: &[Value]) -> AssertionResult {
    let (Some(min), Some(max)) = (
        args.first().and_then(Value::as_f64),
        args.get(1).and_then(Value::as_f64),
    ) else {
        return bad_args("between", "two numeric arguments");
    };
    let ok = value.as_f64().is_some_and(|v| v >= min && v <= max);
    verdict(ok, "{name} must be between {min} and {max}")
        .with_context("min", args[0].clone())
        .with_context("max", args[1].clone())
}

/// An integer greater than or equal to zero.
pub fn is_natural_number(value: &Value, _args: &[Value]) -> AssertionResult {
    verdict(
        value.as_u64().is_some(),
        "{name} must be a natural number, got {value}",
    )
}

pub fn is_positive(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_f64().is_some_and(|v| v > 0.0);
    verdict(ok, "{name} must be positive, got {value}")
}

pub fn is_negative(value: &Value, _args: &[Value]) -> AssertionResult {
    let ok = value.as_f64().is_some_and(|v| v < 0.0);
    verdict(ok, "{name} must be negative, got {value}")
}

// Equality and membership checks

pub fn equals(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(expected) = args.first() else {
        return bad_args("equals", "a comparison argument");
    };
    verdict(value == expected, "{name} must equal {expected}")
        .with_context("expected", expected.clone())
}

pub fn in_array(value: &Value, args: &[Value]) -> AssertionResult {
    let Some(allowed) = args.first().and_then(Value::as_array) else {
        return bad_args("inArray", "an array argument");
    };
    verdict(
        allowed.contains(value),
        "{name} must be one of {allowed}, got {value}",
    )
    .with_context("allowed", Value::Array(allowed.clone()))
}
