//! Tag selector parsing and caching.
//!
//! A selector is a compact `tag#id.class1.class2` string. The `#id` and `.class`
//! segments may appear in any order after the tag name.

use std::collections::{HashMap, VecDeque};
use std::sync::{LazyLock, Mutex, MutexGuard};

use regex::Regex;

use crate::constants::{CLASS_KEY, DEFAULT_CACHE_CAPACITY};
use crate::error::{FormatIssue, SelectorError};
use crate::value::{Attrs, Value};

static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("Invalid tag name regex"));

static SELECTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9-]*)((?:[#.][^#.]+)*)$").expect("Invalid selector regex")
});

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#.][^#.]+").expect("Invalid segment regex"));

/// Result of parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// Tag name (e.g., "div")
    pub tag: String,

    /// Id from the `#id` segment
    pub id: Option<String>,

    /// Space-joined classes from `.class` segments, in source order
    pub class: Option<String>,
}

impl ParsedSelector {
    fn bare(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: None,
        }
    }

    /// Attribute seed derived from the shorthand: `id` first, then `class`.
    pub fn seed_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new();
        if let Some(id) = &self.id {
            attrs.insert("id".to_string(), Value::Text(id.clone()));
        }
        if let Some(class) = &self.class {
            attrs.insert(CLASS_KEY.to_string(), Value::Text(class.clone()));
        }
        attrs
    }
}

/// Parse a selector without consulting any cache.
pub fn parse_selector(selector: &str) -> Result<ParsedSelector, SelectorError> {
    if selector.chars().any(char::is_whitespace) {
        return Err(SelectorError::InvalidTagFormat {
            selector: selector.to_string(),
            reason: FormatIssue::Spaces,
        });
    }

    if selector.matches('#').count() > 1 {
        return Err(SelectorError::MultipleIds(selector.to_string()));
    }

    if !selector.contains(is_segment_marker) {
        if !TAG_NAME_RE.is_match(selector) {
            return Err(SelectorError::InvalidTagName(selector.to_string()));
        }
        return Ok(ParsedSelector::bare(selector));
    }

    let Some(caps) = SELECTOR_RE.captures(selector) else {
        let tag_end = selector.find(is_segment_marker).unwrap_or(selector.len());
        if !TAG_NAME_RE.is_match(&selector[..tag_end]) {
            return Err(SelectorError::InvalidTagName(selector.to_string()));
        }
        // Tag is fine, so a segment is empty (`div..a`, `div.`, `div#`)
        return Err(SelectorError::InvalidTagFormat {
            selector: selector.to_string(),
            reason: FormatIssue::Malformed,
        });
    };

    let tag = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let segments = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let mut id = None;
    let mut classes = Vec::new();
    for segment in SEGMENT_RE.find_iter(segments) {
        let segment = segment.as_str();
        match segment.split_at(1) {
            ("#", name) => id = Some(name.to_string()),
            (_, name) => classes.push(name),
        }
    }

    Ok(ParsedSelector {
        tag: tag.to_string(),
        id,
        class: (!classes.is_empty()).then(|| classes.join(" ")),
    })
}

fn is_segment_marker(c: char) -> bool {
    c == '#' || c == '.'
}

/// Bounded memo of parsed selectors.
///
/// Evicts the oldest inserted entry once full. Lookups never reorder entries.
#[derive(Debug)]
pub struct SelectorCache {
    inner: Mutex<CacheInner>,
}

#[derive(Debug)]
struct CacheInner {
    capacity: usize,
    entries: HashMap<String, ParsedSelector>,
    order: VecDeque<String>,
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SelectorCache {
    /// Create a cache holding at most `capacity` selectors. Zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                capacity,
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Parse `selector`, returning an independent copy of the cached result.
    pub fn parse(&self, selector: &str) -> Result<ParsedSelector, SelectorError> {
        if let Some(hit) = self.lock().entries.get(selector) {
            tracing::trace!(selector, "selector cache hit");
            return Ok(hit.clone());
        }

        let parsed = parse_selector(selector)?;
        tracing::trace!(selector, tag = %parsed.tag, "selector parsed");

        let mut inner = self.lock();
        if inner.capacity == 0 || inner.entries.contains_key(selector) {
            return Ok(parsed);
        }
        while inner.entries.len() >= inner.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            tracing::debug!(selector = %oldest, "evicted selector from cache");
        }
        inner.order.push_back(selector.to_string());
        inner.entries.insert(selector.to_string(), parsed.clone());

        Ok(parsed)
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.lock().entries.contains_key(selector)
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // Entries are inserted whole, so a poisoned cache is still consistent
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
