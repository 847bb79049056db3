//! HTML escaping for text content and attribute values.

use crate::value::Value;

/// Escape HTML special characters, including both quote styles.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Stringify a value, then escape the result.
pub fn escape_value(value: &Value) -> String {
    escape_html(&value.to_text())
}
