//! Shape classification of values in element position.

use crate::constants::FRAGMENT_MARKER;
use crate::value::{Attrs, Component, Props, Value};

/// What a value means when it appears where an element is expected.
///
/// Computed once per node by [`classify`]; the renderer only matches on this.
#[derive(Debug)]
pub enum Element<'a> {
    Null,
    Undefined,
    /// Exactly `false`
    Skip,
    /// Any other non-sequence value, rendered as its escaped text
    Leaf(&'a Value),
    /// A sequence with no entries
    Empty,
    Component {
        component: &'a Component,
        props: Props,
    },
    /// Members rendered one after another
    List(&'a [Value]),
    Fragment(&'a [Value]),
    Tag {
        selector: &'a str,
        attrs: Option<&'a Attrs>,
        children: &'a [Value],
    },
}

/// Classify a value by shape.
pub fn classify(value: &Value) -> Element<'_> {
    let items = match value {
        Value::Null => return Element::Null,
        Value::Undefined => return Element::Undefined,
        Value::Bool(false) => return Element::Skip,
        Value::Seq(items) => items.as_slice(),
        _ => return Element::Leaf(value),
    };

    let Some((head, rest)) = items.split_first() else {
        return Element::Empty;
    };

    match head {
        Value::Component(component) => {
            let (attrs, children) = split_attrs(rest);
            Element::Component {
                component,
                props: Props::new(attrs.cloned().unwrap_or_default(), children.to_vec()),
            }
        }
        Value::Text(marker) if marker == FRAGMENT_MARKER => Element::Fragment(rest),
        Value::Text(selector) => {
            let (attrs, children) = split_attrs(rest);
            Element::Tag {
                selector,
                attrs,
                children,
            }
        }
        _ => Element::List(items),
    }
}

/// Split a leading attribute map off the entries that follow a head.
fn split_attrs(rest: &[Value]) -> (Option<&Attrs>, &[Value]) {
    match rest.split_first() {
        Some((Value::Map(attrs), children)) => (Some(attrs), children),
        _ => (None, rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, seq};

    #[test]
    fn only_false_is_skipped() {
        assert!(matches!(classify(&Value::from(false)), Element::Skip));
        assert!(matches!(classify(&Value::from(0)), Element::Leaf(_)));
        assert!(matches!(classify(&Value::from("")), Element::Leaf(_)));
        assert!(matches!(classify(&Value::Null), Element::Null));
        assert!(matches!(classify(&Value::Undefined), Element::Undefined));
    }

    #[test]
    fn classifies_tag_with_attrs() {
        let value = seq!["div", attrs! { "id" => "x" }, "a", "b"];

        let Element::Tag {
            selector,
            attrs,
            children,
        } = classify(&value)
        else {
            panic!("expected a tag");
        };

        assert_eq!(selector, "div");
        assert!(attrs.is_some());
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn classifies_fragment_and_lists() {
        assert!(matches!(
            classify(&seq![":<>", "a"]),
            Element::Fragment(rest) if rest.len() == 1
        ));
        assert!(matches!(
            classify(&seq![seq!["p"], seq!["p"]]),
            Element::List(items) if items.len() == 2
        ));
        assert!(matches!(classify(&seq![1, 2]), Element::List(_)));
        assert!(matches!(classify(&Value::Seq(vec![])), Element::Empty));
    }

    #[test]
    fn component_without_attrs_gets_all_children() {
        let card = Component::new(|_| Value::from(false));
        let value = seq![card, "a", seq!["b"]];

        let Element::Component { props, .. } = classify(&value) else {
            panic!("expected a component");
        };

        assert!(props.get("title").is_none());
        assert_eq!(props.children().len(), 2);
    }

    #[test]
    fn component_takes_leading_map_as_props() {
        let card = Component::new(|_| Value::from(false));
        let value = seq![card, attrs! { "title" => "Hi" }, "kid"];

        let Element::Component { props, .. } = classify(&value) else {
            panic!("expected a component");
        };

        assert_eq!(props.value("title").to_text(), "Hi");
        assert_eq!(props.children().len(), 1);
    }

    #[test]
    fn non_sequence_values_are_leaves() {
        let handler = crate::value::Handler::new(|_| {});

        assert!(matches!(classify(&attrs! { "a" => 1 }), Element::Leaf(_)));
        assert!(matches!(classify(&Value::from(handler)), Element::Leaf(_)));
        assert!(matches!(
            classify(&Value::from(Component::new(|_| Value::Null))),
            Element::Leaf(_)
        ));
    }
}
