//! Cache Store Module
//!
//! A single named store: a mapping from request key (method + URL) to a
//! stored response, with per-store lookup statistics.

use std::collections::HashMap;

use crate::cache::{CachedResponse, StoreStats};

// == Cache Store ==
/// A named, in-memory mapping from request keys to stored responses.
///
/// Keys are derived from the request (`"METHOD url"`), so two requests for
/// the same URL with different methods never collide.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Stored responses by request key
    entries: HashMap<String, CachedResponse>,
    /// Lookup statistics
    stats: StoreStats,
}

impl CacheStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Retrieves a copy of the stored response for `key`, recording the
    /// lookup as a hit or miss.
    pub fn lookup(&mut self, key: &str) -> Option<CachedResponse> {
        match self.entries.get(key) {
            Some(response) => {
                self.stats.record_hit();
                Some(response.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns true if an entry exists for `key` without touching statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Put ==
    /// Stores a response under `key`, overwriting any previous entry.
    pub fn put(&mut self, key: String, response: CachedResponse) {
        self.entries.insert(key, response);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores a batch of responses in one step. Used by install-time
    /// pre-population after the whole batch has been fetched successfully.
    pub fn put_batch(&mut self, batch: Vec<(String, CachedResponse)>) {
        for (key, response) in batch {
            self.entries.insert(key, response);
        }
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes the entry for `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<CachedResponse> {
        let removed = self.entries.remove(key);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
