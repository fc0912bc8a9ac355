//! Cache Statistics Module
//!
//! Tracks lookup metrics per store: hits, misses and the current entry count.

use serde::Serialize;

// == Store Stats ==
/// Lookup metrics for a single cache store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of lookups that found a stored response
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Current number of stored responses
    pub total_entries: usize,
}

impl StoreStats {
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the hit rate: hits / (hits + misses), or 0.0 with no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Updates the entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Folds another store's counters into this one, for aggregate reporting.
    pub fn merge(&mut self, other: &StoreStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.total_entries += other.total_entries;
    }
}
