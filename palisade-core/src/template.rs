// Message template rendering

use indexmap::IndexMap;
use serde_json::Value;

/// Renders a message template by substituting `{name}`, `{value}` and
/// `{<context-key>}` placeholders.
///
/// A placeholder may carry a format suffix: `:raw` (string without quoting),
/// `:type` (the value's type name), `:float`, `:hex`. Unknown placeholders
/// are left verbatim so a bad template stays diagnosable.
pub fn render(
    template: &str,
    name: &str,
    value: &Value,
    context: &IndexMap<String, Value>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close) => {
                let placeholder = &tail[..close];
                match substitute(placeholder, name, value, context) {
                    Some(rendered) => out.push_str(&rendered),
                    None => {
                        out.push('{');
                        out.push_str(placeholder);
                        out.push('}');
                    }
                }
                rest = &tail[close + 1..];
            }
            None => {
                // Unterminated brace, keep the remainder as-is.
                out.push('{');
                rest = tail;
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

fn substitute(
    placeholder: &str,
    name: &str,
    value: &Value,
    context: &IndexMap<String, Value>,
) -> Option<String> {
    let (key, suffix) = match placeholder.split_once(':') {
        Some((key, suffix)) => (key, Some(suffix)),
        None => (placeholder, None),
    };

    if key == "name" {
        return Some(name.to_string());
    }
    let target = if key == "value" {
        value
    } else {
        context.get(key)?
    };
    Some(format_value(target, suffix))
}

fn format_value(value: &Value, suffix: Option<&str>) -> String {
    match suffix {
        Some("raw") => match value {
            Value::String(s) => s.clone(),
            other => default_format(other),
        },
        Some("type") => type_name(value).to_string(),
        Some("float") => match value.as_f64() {
            Some(f) => format!("{f:?}"),
            None => default_format(value),
        },
        Some("hex") => match value.as_i64() {
            Some(i) => format!("{i:x}"),
            None => default_format(value),
        },
        _ => default_format(value),
    }
}

fn default_format(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Compact JSON for containers.
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
