//! Render nested element values into HTML.
//!
//! Markup is described with plain values: a sequence whose first entry is a
//! selector string is a tag, `":<>"` starts a fragment, a [`Component`] in first
//! position is invoked with its props, and any other sequence is a list of
//! elements. `false` renders nothing; `null` is always an error.
//!
//! ```
//! use tessera_markup::{attrs, render_to_string, seq};
//!
//! let html = render_to_string(&[seq![
//!     "ul#menu.nav",
//!     seq!["li", attrs! { "class" => seq!["item", false] }, "Home"],
//! ]])
//! .unwrap();
//!
//! assert_eq!(html, r#"<ul id="menu" class="nav"><li class="item">Home</li></ul>"#);
//! ```
//!
//! [`render_with_bindings`] additionally records `on:` handlers so they can be
//! attached to a [`Surface`] once the markup is in place.

pub mod attributes;
pub mod bindings;
pub mod constants;
pub mod element;
pub mod error;
pub mod escape;
pub mod normalize;
pub mod renderer;
pub mod selector;
pub mod surface;
pub mod value;

pub use bindings::{Binding, BindingRecorder};
pub use element::{classify, Element};
pub use error::{FormatIssue, RenderError, RenderResult, SelectorError, ValueLocation};
pub use escape::{escape_html, escape_value};
pub use normalize::{normalize_class, normalize_style};
pub use renderer::{fragment, render_to_string, render_with_bindings, RenderConfig, Rendered, Renderer};
pub use selector::{parse_selector, ParsedSelector, SelectorCache};
pub use surface::{cleanup, ContainerRef, DomEvent, MemoryNode, MemorySurface, Surface};
pub use value::{Attrs, Component, Handler, Props, Value};
