//! Event binding bookkeeping for rendered markup.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::constants::BINDING_ID_PREFIX;
use crate::value::Handler;

/// Source of binding ids; shared by every render in the process so ids from
/// separate renders never collide on one surface.
static NEXT_BINDING_ID: AtomicU64 = AtomicU64::new(1);

/// Handlers to attach to one rendered element.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Synthetic id written into the element's marker attribute
    pub id: String,

    /// Event name to handler
    pub events: IndexMap<String, Handler>,
}

/// Collects bindings in document order during a single render.
#[derive(Debug, Default)]
pub struct BindingRecorder {
    bindings: Vec<Binding>,
}

impl BindingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the handlers of one element and return its synthetic id.
    pub fn record(&mut self, events: Vec<(String, Handler)>) -> String {
        let n = NEXT_BINDING_ID.fetch_add(1, Ordering::Relaxed);
        let id = format!("{BINDING_ID_PREFIX}{n}");

        tracing::trace!(id, events = events.len(), "recorded binding");
        self.bindings.push(Binding {
            id: id.clone(),
            events: events.into_iter().collect(),
        });

        id
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }
}
