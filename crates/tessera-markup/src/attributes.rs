//! Separation of a merged attribute map into renderable attributes, event
//! handlers and raw HTML content.

use crate::constants::{CLASS_KEY, EVENT_PREFIX, RAW_HTML_KEY, STYLE_KEY};
use crate::error::{RenderError, RenderResult};
use crate::escape::escape_html;
use crate::normalize::{normalize_class, normalize_style};
use crate::value::{Attrs, Handler, Value};

/// Attributes of one tag, split by purpose.
#[derive(Debug, Default)]
pub struct AttributeSet {
    /// Attributes to emit, with `style`/`class` already normalized
    pub attrs: Attrs,

    /// Event name (prefix stripped) and handler, in attribute order
    pub events: Vec<(String, Handler)>,

    /// Unescaped content replacing the children
    pub raw_html: Option<String>,
}

impl AttributeSet {
    /// Split a merged attribute map.
    ///
    /// Fails on the first `null`/undefined value. Event keys never reach
    /// `attrs`; non-callable event values are dropped.
    pub fn split(merged: Attrs) -> RenderResult<Self> {
        let mut set = AttributeSet::default();

        for (key, value) in merged {
            match value {
                Value::Null => return Err(RenderError::null_attribute(&key)),
                Value::Undefined => return Err(RenderError::undefined_attribute(&key)),
                _ => {}
            }

            if let Some(event) = key.strip_prefix(EVENT_PREFIX) {
                match value {
                    Value::Handler(handler) => set.events.push((event.to_string(), handler)),
                    other => {
                        tracing::trace!(key, kind = other.kind(), "dropping non-callable event value")
                    }
                }
                continue;
            }

            if key == RAW_HTML_KEY {
                set.raw_html = Some(value.to_text());
            } else if key == STYLE_KEY {
                set.attrs.insert(key, Value::Text(normalize_style(&value)));
            } else if key == CLASS_KEY {
                set.attrs.insert(key, Value::Text(normalize_class(&value)));
            } else {
                set.attrs.insert(key, value);
            }
        }

        Ok(set)
    }
}

/// Append ` name="value"` pairs for every renderable attribute.
///
/// `true` emits the bare name, `false` and callables emit nothing.
pub fn write_attrs(out: &mut String, attrs: &Attrs) {
    for (key, value) in attrs {
        match value {
            Value::Bool(false) | Value::Component(_) | Value::Handler(_) => {}
            Value::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            other => {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_html(&other.to_text()));
                out.push('"');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, seq};
    use pretty_assertions::assert_eq;

    fn map(value: Value) -> Attrs {
        match value {
            Value::Map(map) => map,
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn separates_events_from_attributes() {
        let set = AttributeSet::split(map(attrs! {
            "id" => "go",
            "on:click" => Handler::new(|_| {}),
            "on:keyDown" => Handler::new(|_| {}),
            "on:hover" => "not callable",
        }))
        .unwrap();

        let events: Vec<&str> = set.events.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(events, vec!["click", "keyDown"]);
        assert_eq!(set.attrs.len(), 1);
        assert!(set.attrs.contains_key("id"));
    }

    #[test]
    fn extracts_raw_html() {
        let set = AttributeSet::split(map(attrs! { "innerHTML" => "<b>x</b>" })).unwrap();

        assert_eq!(set.raw_html.as_deref(), Some("<b>x</b>"));
        assert!(set.attrs.is_empty());
    }

    #[test]
    fn normalizes_style_and_class() {
        let set = AttributeSet::split(map(attrs! {
            "style" => attrs! { "fontWeight" => "bold" },
            "class" => seq!["a", false, "b"],
        }))
        .unwrap();

        assert_eq!(set.attrs["style"].as_str(), Some("font-weight: bold"));
        assert_eq!(set.attrs["class"].as_str(), Some("a b"));
    }

    #[test]
    fn null_attribute_is_an_error() {
        let err = AttributeSet::split(map(attrs! { "title" => Value::Null })).unwrap_err();

        assert_eq!(err, RenderError::null_attribute("title"));
    }

    #[test]
    fn null_event_value_is_an_error() {
        let err = AttributeSet::split(map(attrs! { "on:click" => Value::Undefined })).unwrap_err();

        assert_eq!(err, RenderError::undefined_attribute("on:click"));
    }

    #[test]
    fn writes_boolean_and_escaped_attributes() {
        let attrs = map(attrs! {
            "type" => "checkbox",
            "checked" => false,
            "disabled" => true,
            "title" => "a \"quote\"",
            "tabindex" => 0,
        });
        let mut out = String::new();

        write_attrs(&mut out, &attrs);

        assert_eq!(
            out,
            r#" type="checkbox" disabled title="a &quot;quote&quot;" tabindex="0""#
        );
    }
}
