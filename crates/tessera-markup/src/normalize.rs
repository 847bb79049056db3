//! Style and class attribute normalization.
//!
//! Both functions are total: unsupported shapes normalize to an empty string.

use crate::value::Value;

/// Convert a style value to a CSS declaration string.
///
/// Text passes through. A mapping becomes `property: value` pairs joined by
/// `"; "`, with camelCase keys rewritten to hyphen-case. Keys that start with an
/// uppercase letter gain a leading hyphen (`WebkitTransform` -> `-webkit-transform`).
pub fn normalize_style(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Map(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", hyphenate(key), value.to_text()))
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    }
}

/// Convert a class value to a space-separated class list.
///
/// Text passes through. A sequence drops falsy entries and joins the rest.
pub fn normalize_class(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Seq(items) => items
            .iter()
            .filter(|item| item.is_truthy())
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// Insert a hyphen before every ASCII uppercase letter and lowercase it.
fn hyphenate(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
