//! Named filters
//!
//! Filters are the `name:` prefixes of a replacement, as in `{{text:Front}}`. The renderer
//! handles `type` itself; every other name is looked up in a [FilterRegistry] supplied by the
//! caller. Cloze, furigana, hint and friends live outside this crate and are registered here.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The filter the renderer resolves on its own: it defers the field to the answer-typing stage.
pub const TYPE_FILTER: &str = "type";

/// A text transform applied to a field value.
pub trait Filter: Send + Sync {
    /// Transform `text`, the current value for the field `key`.
    fn apply(&self, text: &str, key: &str) -> String;
}

impl<F> Filter for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn apply(&self, text: &str, key: &str) -> String {
        self(text, key)
    }
}

/// Registry of filters by name
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter, replacing any filter previously registered under `name`.
    ///
    /// `type` can be registered but is never consulted by the renderer.
    pub fn register(&mut self, name: impl Into<String>, filter: impl Filter + 'static) {
        self.filters.insert(name.into(), Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered names, sorted
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<_> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Apply the filter registered under `name`. Unknown filters leave the text unchanged.
    pub fn apply(&self, name: &str, text: &str, key: &str) -> String {
        match self.filters.get(name) {
            Some(filter) => filter.apply(text, key),
            None => {
                tracing::debug!(filter = name, field = key, "unknown filter, text left as is");
                text.to_string()
            }
        }
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.available())
            .finish()
    }
}
