//! Cache Registry Module
//!
//! The set of named cache stores. Stores are created on first open,
//! enumerated and pruned at activation, and deleted wholesale on an explicit
//! clear request.

use std::collections::HashMap;

use crate::cache::{CacheStore, StoreStats};

// == Cache Registry ==
/// Holds every named store the worker has created.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    stores: HashMap<String, CacheStore>,
}

impl CacheRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Open ==
    /// Returns the store named `name`, creating it empty if absent.
    pub fn open(&mut self, name: &str) -> &mut CacheStore {
        self.stores.entry(name.to_string()).or_default()
    }

    /// Returns the store named `name` if it exists.
    pub fn get(&self, name: &str) -> Option<&CacheStore> {
        self.stores.get(name)
    }

    // == Delete ==
    /// Deletes the store named `name`. Returns true if it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.stores.remove(name).is_some()
    }

    /// Deletes every store, returning how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.stores.len();
        self.stores.clear();
        count
    }

    // == Enumeration ==
    /// Names of all existing stores.
    pub fn store_names(&self) -> Vec<String> {
        self.stores.keys().cloned().collect()
    }

    /// Number of entries in the store named `name`, 0 if it does not exist.
    pub fn store_size(&self, name: &str) -> usize {
        self.stores.get(name).map_or(0, CacheStore::len)
    }

    /// Aggregated lookup statistics across every store.
    pub fn aggregate_stats(&self) -> StoreStats {
        let mut total = StoreStats::new();
        for store in self.stores.values() {
            total.merge(&store.stats());
        }
        total
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if no stores exist.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
