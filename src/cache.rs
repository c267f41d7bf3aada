//! In-process caching of loaded views
//!
//! Parent lookups walk the tree one definition at a time. A [`ViewCache`]
//! attached to a [`crate::view::Views`] repository keeps parsed views keyed
//! by path so repeated walks (`is_child_of`, page titles, type scans) do not
//! re-read and re-parse the same definitions. The cache is owned by the
//! caller; repositories clear it whenever they write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::trace;

use crate::error::Result;
use crate::view::View;

/// Shared cache of parsed views, keyed by normalized view path
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    cache: Arc<Mutex<HashMap<String, View>>>,
}

impl ViewCache {
    /// Create a new empty view cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached view, or load and cache it if not present
    pub fn get_or_load<F>(&self, path: &str, loader: F) -> Result<View>
    where
        F: FnOnce() -> Result<View>,
    {
        if let Some(cached) = self.get(path) {
            trace!("view cache hit: {}", path);
            return Ok(cached);
        }

        let view = loader()?;
        self.insert(path, view.clone());
        Ok(view)
    }

    /// Manually insert a view into the cache
    pub fn insert(&self, path: &str, view: View) {
        self.lock().insert(path.to_string(), view);
    }

    /// Get a view from cache without loading
    pub fn get(&self, path: &str) -> Option<View> {
        self.lock().get(path).cloned()
    }

    /// Check if a path is cached
    pub fn contains(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every operation leaves the map consistent, so poisoning is ignored.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, View>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
