//! The recursive element renderer.

use std::sync::{Arc, LazyLock};

use serde::Deserialize;

use crate::attributes::{write_attrs, AttributeSet};
use crate::bindings::{Binding, BindingRecorder};
use crate::constants::{
    is_void_tag, BINDING_ATTR, DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_DEPTH, FRAGMENT_MARKER,
};
use crate::element::{classify, Element};
use crate::error::{RenderError, RenderResult, ValueLocation};
use crate::escape::escape_value;
use crate::selector::SelectorCache;
use crate::value::{Attrs, Component, Props, Value};

static SHARED_CACHE: LazyLock<Arc<SelectorCache>> =
    LazyLock::new(|| Arc::new(SelectorCache::new(DEFAULT_CACHE_CAPACITY)));

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Deepest nesting level that still renders
    pub max_depth: usize,

    /// Selectors kept by a renderer-owned cache
    pub cache_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Markup plus the event bindings collected while producing it.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub markup: String,

    /// Bindings in document order
    pub bindings: Vec<Binding>,
}

/// Renders element values into HTML.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    cache: Arc<SelectorCache>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer {
    /// Create a renderer with its own selector cache.
    pub fn new(config: RenderConfig) -> Self {
        let cache = Arc::new(SelectorCache::new(config.cache_capacity));
        Self { config, cache }
    }

    /// Create a renderer that shares `cache` with others.
    pub fn with_cache(config: RenderConfig, cache: Arc<SelectorCache>) -> Self {
        Self { config, cache }
    }

    /// A default-configured renderer backed by the process-wide cache.
    pub fn shared() -> Self {
        Self::with_cache(RenderConfig::default(), Arc::clone(&SHARED_CACHE))
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn cache(&self) -> &SelectorCache {
        &self.cache
    }

    /// Render one element to a string.
    pub fn render(&self, element: &Value) -> RenderResult<String> {
        let mut pass = RenderPass::new(self, None);
        pass.render(element, 0)?;
        Ok(pass.out)
    }

    /// Render several top-level elements as one implicit list.
    pub fn render_all(&self, elements: &[Value]) -> RenderResult<String> {
        let mut pass = RenderPass::new(self, None);
        pass.render_top_level(elements)?;
        Ok(pass.out)
    }

    /// Render one element, recording event bindings.
    pub fn render_with_bindings(&self, element: &Value) -> RenderResult<Rendered> {
        let mut pass = RenderPass::new(self, Some(BindingRecorder::new()));
        pass.render(element, 0)?;
        Ok(pass.finish())
    }

    /// Render several top-level elements, recording event bindings.
    pub fn render_all_with_bindings(&self, elements: &[Value]) -> RenderResult<Rendered> {
        let mut pass = RenderPass::new(self, Some(BindingRecorder::new()));
        pass.render_top_level(elements)?;
        Ok(pass.finish())
    }
}

/// State of one top-level render call.
struct RenderPass<'r> {
    renderer: &'r Renderer,
    out: String,
    recorder: Option<BindingRecorder>,
}

impl<'r> RenderPass<'r> {
    fn new(renderer: &'r Renderer, recorder: Option<BindingRecorder>) -> Self {
        Self {
            renderer,
            out: String::new(),
            recorder,
        }
    }

    fn finish(self) -> Rendered {
        Rendered {
            markup: self.out,
            bindings: self.recorder.map(BindingRecorder::into_bindings).unwrap_or_default(),
        }
    }

    /// A single element is used as-is; several form an implicit list.
    fn render_top_level(&mut self, elements: &[Value]) -> RenderResult<()> {
        match elements {
            [single] => self.render(single, 0),
            many => self.render_each(many, 1),
        }
    }

    fn render(&mut self, value: &Value, depth: usize) -> RenderResult<()> {
        let max_depth = self.renderer.config.max_depth;
        if depth > max_depth {
            return Err(RenderError::MaxDepthExceeded { max_depth });
        }

        match classify(value) {
            Element::Null => Err(RenderError::NullValue {
                location: ValueLocation::Element,
            }),
            Element::Undefined => Err(RenderError::UndefinedValue {
                location: ValueLocation::Element,
            }),
            Element::Skip | Element::Empty => Ok(()),
            Element::Leaf(leaf) => {
                self.out.push_str(&escape_value(leaf));
                Ok(())
            }
            Element::Component { component, props } => {
                self.render_component(component, props, depth)
            }
            Element::List(items) | Element::Fragment(items) => {
                self.render_each(items, depth + 1)
            }
            Element::Tag {
                selector,
                attrs,
                children,
            } => self.render_tag(selector, attrs, children, depth),
        }
    }

    fn render_each(&mut self, items: &[Value], depth: usize) -> RenderResult<()> {
        for item in items {
            self.render(item, depth)?;
        }
        Ok(())
    }

    fn render_component(
        &mut self,
        component: &Component,
        props: Props,
        depth: usize,
    ) -> RenderResult<()> {
        tracing::trace!(depth, children = props.children().len(), "invoking component");
        let output = component.call(props);
        self.render(&output, depth + 1)
    }

    fn render_tag(
        &mut self,
        selector: &str,
        attrs: Option<&Attrs>,
        children: &[Value],
        depth: usize,
    ) -> RenderResult<()> {
        let parsed = self.renderer.cache.parse(selector)?;

        // Explicit attributes replace shorthand values of the same name
        let mut merged = parsed.seed_attrs();
        if let Some(attrs) = attrs {
            for (key, value) in attrs {
                merged.insert(key.clone(), value.clone());
            }
        }

        let AttributeSet {
            mut attrs,
            events,
            raw_html,
        } = AttributeSet::split(merged)?;

        if !events.is_empty() {
            if let Some(recorder) = self.recorder.as_mut() {
                let id = recorder.record(events);
                attrs.insert(BINDING_ATTR.to_string(), Value::Text(id));
            }
        }

        let tag = parsed.tag.as_str();
        self.out.push('<');
        self.out.push_str(tag);
        write_attrs(&mut self.out, &attrs);
        self.out.push('>');

        if is_void_tag(tag) {
            return Ok(());
        }

        match raw_html {
            Some(html) => self.out.push_str(&html),
            None => self.render_each(children, depth + 1)?,
        }

        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
        Ok(())
    }
}

/// Render elements with the shared renderer.
///
/// One element renders as-is; several render in order as an implicit list.
pub fn render_to_string(elements: &[Value]) -> RenderResult<String> {
    Renderer::shared().render_all(elements)
}

/// Like [`render_to_string`], also collecting event bindings.
pub fn render_with_bindings(elements: &[Value]) -> RenderResult<Rendered> {
    Renderer::shared().render_all_with_bindings(elements)
}

/// Build a fragment element: `[":<>", ...elements]`.
pub fn fragment(elements: impl IntoIterator<Item = Value>) -> Value {
    let mut items = vec![Value::from(FRAGMENT_MARKER)];
    items.extend(elements);
    Value::Seq(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Handler;
    use crate::{attrs, seq};
    use pretty_assertions::assert_eq;

    fn render(value: Value) -> RenderResult<String> {
        Renderer::default().render(&value)
    }

    fn nested(levels: usize) -> Value {
        let mut el = Value::from("x");
        for _ in 0..levels {
            el = seq!["div", el];
        }
        el
    }

    #[test]
    fn renders_text_child() {
        assert_eq!(render(seq!["div", "Hello"]).unwrap(), "<div>Hello</div>");
    }

    #[test]
    fn escapes_text() {
        assert_eq!(
            render(seq!["div", "<script>"]).unwrap(),
            "<div>&lt;script&gt;</div>"
        );
    }

    #[test]
    fn renders_void_tag_without_children() {
        assert_eq!(
            render(seq!["input", attrs! { "type" => "checkbox", "checked" => false }]).unwrap(),
            r#"<input type="checkbox">"#
        );
        assert_eq!(render(seq!["br", "ignored", seq!["b"]]).unwrap(), "<br>");
    }

    #[test]
    fn void_tag_drops_raw_html() {
        assert_eq!(
            render(seq!["img", attrs! { "src" => "a.png", "innerHTML" => "<b>x</b>" }]).unwrap(),
            r#"<img src="a.png">"#
        );
    }

    #[test]
    fn raw_html_replaces_children() {
        assert_eq!(
            render(seq!["div", attrs! { "innerHTML" => "<b>bold</b>" }, "dropped"]).unwrap(),
            "<div><b>bold</b></div>"
        );
    }

    #[test]
    fn fragment_skips_false() {
        assert_eq!(
            render(seq![":<>", seq!["p", "A"], false, seq!["p", "B"]]).unwrap(),
            "<p>A</p><p>B</p>"
        );
    }

    #[test]
    fn falsy_leaves_render_as_text() {
        assert_eq!(render(seq!["span", 0]).unwrap(), "<span>0</span>");
        assert_eq!(render(seq!["span", ""]).unwrap(), "<span></span>");
        assert_eq!(render(seq!["span", true]).unwrap(), "<span>true</span>");
    }

    #[test]
    fn nested_lists_flatten_in_order() {
        let items: Value = ["a", "b", "c"].iter().map(|s| seq!["li", *s]).collect();

        assert_eq!(
            render(seq!["ul", items, seq![seq!["li", "d"]]]).unwrap(),
            "<ul><li>a</li><li>b</li><li>c</li><li>d</li></ul>"
        );
    }

    #[test]
    fn null_child_is_an_error() {
        assert_eq!(
            render(seq!["div", "ok", Value::Null]),
            Err(RenderError::NullValue {
                location: ValueLocation::Element
            })
        );
        assert_eq!(
            render(seq!["div", Value::Undefined]),
            Err(RenderError::UndefinedValue {
                location: ValueLocation::Element
            })
        );
    }

    #[test]
    fn depth_limit_is_inclusive() {
        assert!(render(nested(100)).is_ok());
        assert_eq!(
            render(nested(101)),
            Err(RenderError::MaxDepthExceeded { max_depth: 100 })
        );
    }

    #[test]
    fn custom_depth_limit() {
        let renderer = Renderer::new(RenderConfig {
            max_depth: 2,
            ..RenderConfig::default()
        });

        assert!(renderer.render(&nested(2)).is_ok());
        assert!(renderer.render(&nested(3)).is_err());
    }

    #[test]
    fn explicit_attrs_override_shorthand() {
        assert_eq!(
            render(seq!["div#a.b", attrs! { "id" => "c", "class" => "d" }]).unwrap(),
            r#"<div id="c" class="d"></div>"#
        );
    }

    #[test]
    fn shorthand_and_explicit_attrs_merge() {
        assert_eq!(
            render(seq![
                "a.link",
                attrs! { "href" => "/x?a=1&b=2", "style" => attrs! { "marginTop" => "4px" } },
                "Go"
            ])
            .unwrap(),
            r#"<a class="link" href="/x?a=1&amp;b=2" style="margin-top: 4px">Go</a>"#
        );
    }

    #[test]
    fn renders_component_with_props() {
        let card = Component::new(|props| seq!["div.card", props.value("title")]);

        assert_eq!(
            render(seq![card, attrs! { "title" => "Hi" }]).unwrap(),
            r#"<div class="card">Hi</div>"#
        );
    }

    #[test]
    fn component_receives_children() {
        let panel = Component::new(|props| seq!["section", props.children_value()]);

        assert_eq!(
            render(seq![panel, seq!["h2", "T"], "body"]).unwrap(),
            "<section><h2>T</h2>body</section>"
        );
    }

    #[test]
    fn component_reads_children_property() {
        let wrap = Component::new(|props| seq!["section", props.value("children")]);

        assert_eq!(
            render(seq![wrap, attrs! { "x" => 1 }, "kid"]).unwrap(),
            "<section>kid</section>"
        );
    }

    #[test]
    fn non_sequence_values_render_as_text() {
        assert_eq!(
            render(seq!["div", "a", attrs! { "k" => 1 }]).unwrap(),
            "<div>a[object Object]</div>"
        );
        assert_eq!(
            render(seq!["p", Handler::new(|_| {})]).unwrap(),
            "<p>[function]</p>"
        );
    }

    #[test]
    fn component_missing_prop_fails() {
        let card = Component::new(|props| seq!["div", props.value("title")]);

        assert!(matches!(
            render(seq![card]),
            Err(RenderError::UndefinedValue { .. })
        ));
    }

    #[test]
    fn selector_errors_abort_render() {
        assert!(matches!(
            render(seq!["div", seq!["bad tag"]]),
            Err(RenderError::Selector(_))
        ));
    }

    #[test]
    fn events_are_dropped_without_recorder() {
        assert_eq!(
            render(seq!["button", attrs! { "on:click" => Handler::new(|_| {}) }, "Go"]).unwrap(),
            "<button>Go</button>"
        );
    }

    #[test]
    fn records_bindings_in_document_order() {
        let click = Handler::new(|_| {});
        let renderer = Renderer::default();

        let rendered = renderer
            .render_with_bindings(&seq![
                ":<>",
                seq!["button", attrs! { "on:click" => click.clone() }, "Go"],
                seq!["input", attrs! { "on:input" => Handler::new(|_| {}), "on:blur" => 1 }],
                seq!["p", "plain"]
            ])
            .unwrap();

        assert_eq!(rendered.bindings.len(), 2);
        let (first, second) = (&rendered.bindings[0].id, &rendered.bindings[1].id);
        assert_eq!(
            rendered.markup,
            format!(
                r#"<button data-tessera-id="{first}">Go</button><input data-tessera-id="{second}"><p>plain</p>"#
            )
        );
        assert!(rendered.bindings[0].events["click"].ptr_eq(&click));
        assert_eq!(rendered.bindings[1].events.len(), 1);
    }

    #[test]
    fn binding_ids_stay_unique_across_renders() {
        let renderer = Renderer::default();
        let button = || seq!["button", attrs! { "on:click" => Handler::new(|_| {}) }];

        let first = renderer.render_with_bindings(&button()).unwrap();
        let second = renderer.render_with_bindings(&button()).unwrap();

        assert_ne!(first.bindings[0].id, second.bindings[0].id);
        assert_ne!(first.markup, second.markup);
    }

    #[test]
    fn multiple_top_level_elements_form_a_list() {
        let renderer = Renderer::default();

        assert_eq!(
            renderer
                .render_all(&[seq!["p", "A"], Value::from("text"), seq!["p", "B"]])
                .unwrap(),
            "<p>A</p>text<p>B</p>"
        );
        assert_eq!(renderer.render_all(&[]).unwrap(), "");
    }

    #[test]
    fn fragment_builder_prepends_marker() {
        let el = fragment([seq!["b", "x"], Value::from("y")]);

        assert_eq!(render(el).unwrap(), "<b>x</b>y");
    }

    #[test]
    fn renderer_caches_selectors() {
        let renderer = Renderer::default();

        renderer.render(&seq!["div.a", seq!["span"]]).unwrap();

        assert!(renderer.cache().contains("div.a"));
        assert!(renderer.cache().contains("span"));
    }

    #[test]
    fn error_discards_partial_output() {
        let result = render(seq![":<>", seq!["p", "kept?"], Value::Null]);

        assert!(result.is_err());
    }
}
