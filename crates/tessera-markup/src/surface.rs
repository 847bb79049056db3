//! Presentation surface seam: writing markup into a container and attaching
//! recorded bindings.

use std::fmt;

use indexmap::IndexMap;

use crate::constants::BINDING_ATTR;
use crate::error::{RenderError, RenderResult};
use crate::renderer::Rendered;
use crate::value::Handler;

/// How a caller names a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    /// Host-assigned handle
    Handle(u64),
    /// Lookup key, typically a selector like `#app`
    Key(String),
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Handle(handle) => write!(f, "handle {handle}"),
            ContainerRef::Key(key) => write!(f, "'{key}'"),
        }
    }
}

impl From<&str> for ContainerRef {
    fn from(key: &str) -> Self {
        ContainerRef::Key(key.to_string())
    }
}

impl From<String> for ContainerRef {
    fn from(key: String) -> Self {
        ContainerRef::Key(key)
    }
}

impl From<u64> for ContainerRef {
    fn from(handle: u64) -> Self {
        ContainerRef::Handle(handle)
    }
}

/// Event delivered to a [`Handler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// Event name (e.g., "click")
    pub name: String,

    /// Binding id of the element the listener is registered on
    pub target: String,
}

/// A host that can display markup and deliver events.
pub trait Surface {
    type Node: Clone;

    fn resolve(&self, container: &ContainerRef) -> Option<Self::Node>;

    /// Replace the node's content; listeners on the old content go with it.
    fn replace_content(&mut self, node: &Self::Node, markup: &str);

    /// Find the element under `root` whose `attribute` equals `value`.
    fn find_marked(&self, root: &Self::Node, attribute: &str, value: &str) -> Option<Self::Node>;

    fn listen(&mut self, node: &Self::Node, event: &str, handler: Handler);

    fn clear(&mut self, node: &Self::Node);
}

impl Rendered {
    /// Write the markup into `container` and register every recorded handler.
    pub fn attach<S: Surface>(&self, surface: &mut S, container: &ContainerRef) -> RenderResult<()> {
        let node = surface
            .resolve(container)
            .ok_or_else(|| RenderError::ContainerNotFound(container.to_string()))?;

        surface.replace_content(&node, &self.markup);

        for binding in &self.bindings {
            let Some(target) = surface.find_marked(&node, BINDING_ATTR, &binding.id) else {
                tracing::warn!(id = %binding.id, "bound element missing from container");
                continue;
            };
            for (event, handler) in &binding.events {
                surface.listen(&target, event, handler.clone());
            }
        }

        tracing::debug!(%container, bindings = self.bindings.len(), "attached markup");
        Ok(())
    }
}

/// Empty a container, dropping its listeners.
pub fn cleanup<S: Surface>(surface: &mut S, container: &ContainerRef) -> RenderResult<()> {
    let node = surface
        .resolve(container)
        .ok_or_else(|| RenderError::ContainerNotFound(container.to_string()))?;
    surface.clear(&node);
    Ok(())
}

/// Headless surface that keeps container content in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    containers: IndexMap<ContainerRef, MemoryContainer>,
}

#[derive(Debug, Default)]
struct MemoryContainer {
    content: String,
    listeners: Vec<Listener>,
}

#[derive(Debug)]
struct Listener {
    target: Option<String>,
    event: String,
    handler: Handler,
}

/// A container, or a bound element inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
    container: ContainerRef,
    binding: Option<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty container.
    pub fn add_container(&mut self, container: impl Into<ContainerRef>) {
        self.containers.entry(container.into()).or_default();
    }

    pub fn content(&self, container: &ContainerRef) -> Option<&str> {
        self.containers.get(container).map(|c| c.content.as_str())
    }

    pub fn listener_count(&self, container: &ContainerRef) -> usize {
        self.containers
            .get(container)
            .map_or(0, |c| c.listeners.len())
    }

    /// Fire `event` on the element carrying `binding_id`.
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(
        &self,
        container: &ContainerRef,
        binding_id: &str,
        event: &str,
    ) -> RenderResult<usize> {
        let entry = self
            .containers
            .get(container)
            .ok_or_else(|| RenderError::ContainerNotFound(container.to_string()))?;

        let dom_event = DomEvent {
            name: event.to_string(),
            target: binding_id.to_string(),
        };

        let mut fired = 0;
        for listener in &entry.listeners {
            if listener.event == event && listener.target.as_deref() == Some(binding_id) {
                listener.handler.call(&dom_event);
                fired += 1;
            }
        }
        Ok(fired)
    }
}

impl Surface for MemorySurface {
    type Node = MemoryNode;

    fn resolve(&self, container: &ContainerRef) -> Option<MemoryNode> {
        self.containers.contains_key(container).then(|| MemoryNode {
            container: container.clone(),
            binding: None,
        })
    }

    fn replace_content(&mut self, node: &MemoryNode, markup: &str) {
        if let Some(entry) = self.containers.get_mut(&node.container) {
            entry.content = markup.to_string();
            entry.listeners.clear();
        }
    }

    fn find_marked(&self, root: &MemoryNode, attribute: &str, value: &str) -> Option<MemoryNode> {
        let entry = self.containers.get(&root.container)?;
        let needle = format!("{attribute}=\"{value}\"");
        entry.content.contains(&needle).then(|| MemoryNode {
            container: root.container.clone(),
            binding: Some(value.to_string()),
        })
    }

    fn listen(&mut self, node: &MemoryNode, event: &str, handler: Handler) {
        if let Some(entry) = self.containers.get_mut(&node.container) {
            entry.listeners.push(Listener {
                target: node.binding.clone(),
                event: event.to_string(),
                handler,
            });
        }
    }

    fn clear(&mut self, node: &MemoryNode) {
        if let Some(entry) = self.containers.get_mut(&node.container) {
            entry.content.clear();
            entry.listeners.clear();
        }
    }
}
