//! Loose host values that describe markup.
//!
//! A [`Value`] is the literal a caller writes: sequences, attribute maps, text,
//! numbers, callables. Shape decides what a value means, see [`crate::element`].

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::constants::CHILDREN_KEY;
use crate::surface::DomEvent;

/// Insertion-ordered attribute mapping.
///
/// Re-inserting an existing key replaces its value but keeps its position.
pub type Attrs = IndexMap<String, Value>;

/// A function from a properties record to an element.
#[derive(Clone)]
pub struct Component(Rc<dyn Fn(Props) -> Value>);

impl Component {
    pub fn new(f: impl Fn(Props) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the component with its properties.
    pub fn call(&self, props: Props) -> Value {
        (self.0)(props)
    }

    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Component(..)")
    }
}

/// An event handler attached through an `on:` attribute.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&DomEvent)>);

impl Handler {
    pub fn new(f: impl Fn(&DomEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &DomEvent) {
        (self.0)(event)
    }

    /// Whether both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Properties passed to a [`Component`].
///
/// Positional children live under the `children` key, like any other property.
#[derive(Debug, Clone, Default)]
pub struct Props {
    attrs: Attrs,
}

impl Props {
    /// Build props; positional `children` win over a `children` attribute.
    pub fn new(mut attrs: Attrs, children: Vec<Value>) -> Self {
        attrs.insert(CHILDREN_KEY.to_string(), Value::Seq(children));
        Self { attrs }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Value of `key`, or [`Value::Undefined`] when the property is absent.
    pub fn value(&self, key: &str) -> Value {
        self.attrs.get(key).cloned().unwrap_or_default()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn children(&self) -> &[Value] {
        match self.attrs.get(CHILDREN_KEY) {
            Some(Value::Seq(items)) => items,
            _ => &[],
        }
    }

    /// Children as a single implicit-list element.
    pub fn children_value(&self) -> Value {
        self.value(CHILDREN_KEY)
    }
}

/// A loose element or attribute value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Seq(Vec<Value>),
    Map(Attrs),
    Component(Component),
    Handler(Handler),
    /// Any value with its own textual conversion.
    Custom(Rc<dyn fmt::Display>),
}

impl Value {
    /// Wrap a value that renders through its `Display` impl.
    pub fn custom(value: impl fmt::Display + 'static) -> Self {
        Value::Custom(Rc::new(value))
    }

    /// Short name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "attribute map",
            Value::Component(_) => "component",
            Value::Handler(_) => "handler",
            Value::Custom(_) => "custom",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as the host literal defines it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Seq(_)
            | Value::Map(_)
            | Value::Component(_)
            | Value::Handler(_)
            | Value::Custom(_) => true,
        }
    }

    /// Standard stringification, applied before escaping.
    pub fn to_text(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Seq(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Map(_) => "[object Object]".to_string(),
            Value::Component(_) | Value::Handler(_) => "[function]".to_string(),
            Value::Custom(c) => c.to_string(),
        }
    }
}

/// Format a number the way the host literal prints it (`3`, `2.5`, `NaN`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Component(c) => fmt::Debug::fmt(c, f),
            Value::Handler(h) => fmt::Debug::fmt(h, f),
            Value::Custom(c) => write!(f, "Custom({c})"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Number(n as f64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<Attrs> for Value {
    fn from(map: Attrs) -> Self {
        Value::Map(map)
    }
}

impl From<Component> for Value {
    fn from(c: Component) -> Self {
        Value::Component(c)
    }
}

impl From<Handler> for Value {
    fn from(h: Handler) -> Self {
        Value::Handler(h)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().map(Into::into).collect())
    }
}

/// Build a [`Value::Seq`], converting each item with `Value::from`.
///
/// ```
/// use tessera_markup::{attrs, seq};
///
/// let el = seq!["a", attrs! { "href" => "/" }, "Home"];
/// ```
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::Value::Seq(vec![$($crate::Value::from($item)),*])
    };
}

/// Build a [`Value::Map`] from `key => value` pairs, preserving order.
#[macro_export]
macro_rules! attrs {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Attrs::new();
        $(map.insert(::std::string::String::from($key), $crate::Value::from($value));)*
        $crate::Value::Map(map)
    }};
}
