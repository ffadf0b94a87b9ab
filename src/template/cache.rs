//! Parse cache
//!
//! Trees are keyed by the exact template text, so editing a template simply produces a new key;
//! [TemplateCache::invalidate] drops the stale entry. Only successful parses are stored.

use crate::template::ast::Node;
use crate::template::error::TemplateError;
use crate::template::parsing::parse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: Mutex<HashMap<String, Arc<Node>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree for `template`, parsing it on first use.
    pub fn get_or_parse(&self, template: &str) -> Result<Arc<Node>, TemplateError> {
        if let Some(node) = self.lock().get(template) {
            return Ok(Arc::clone(node));
        }
        // Parse outside the lock; two threads racing on the same text produce equal trees.
        let node = Arc::new(parse(template)?);
        let mut entries = self.lock();
        let node = entries.entry(template.to_string()).or_insert(node);
        Ok(Arc::clone(node))
    }

    /// Drop the tree for `template`. Returns whether an entry was present.
    pub fn invalidate(&self, template: &str) -> bool {
        self.lock().remove(template).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-inserted entry, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Node>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
