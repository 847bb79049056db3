//! Reserved literals and user-facing message templates.
//!
//! These values are part of the public contract: code that builds fragments or
//! event keys by hand, or matches on error text, relies on them staying stable.

/// First entry of a sequence that renders its remaining entries without a wrapping tag.
pub const FRAGMENT_MARKER: &str = ":<>";

/// Attribute key prefix that marks an event binding (`on:click`).
pub const EVENT_PREFIX: &str = "on:";

/// Attribute holding a class string or a sequence of class names.
pub const CLASS_KEY: &str = "class";

/// Attribute holding a CSS declaration string or a property mapping.
pub const STYLE_KEY: &str = "style";

/// Property under which a component receives its positional children.
pub const CHILDREN_KEY: &str = "children";

/// Attribute whose value is emitted verbatim in place of the element's children.
pub const RAW_HTML_KEY: &str = "innerHTML";

/// Attribute written onto elements that carry event bindings.
pub const BINDING_ATTR: &str = "data-tessera-id";

/// Prefix of the synthetic identifiers stored under [`BINDING_ATTR`].
pub const BINDING_ID_PREFIX: &str = "tessera-";

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default number of parsed selectors kept in a [`SelectorCache`](crate::SelectorCache).
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Elements that never have a closing tag or children.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];

pub const NULL_VALUE_MSG: &str = "Null is not a valid value";
pub const UNDEFINED_VALUE_MSG: &str = "Undefined is not a valid value";
pub const SKIP_HINT_MSG: &str = "use false to render nothing";
pub const MAX_DEPTH_MSG: &str = "Maximum nesting depth exceeded";
pub const INVALID_TAG_NAME_MSG: &str = "Invalid tag name";
pub const SPACES_NOT_ALLOWED_MSG: &str = "Spaces are not allowed in tag selectors";
pub const MALFORMED_TAG_MSG: &str = "Malformed tag selector";
pub const MULTIPLE_IDS_MSG: &str = "Multiple IDs not allowed";
pub const CONTAINER_NOT_FOUND_MSG: &str = "Container not found";

/// Check whether `tag` names a void element.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}
