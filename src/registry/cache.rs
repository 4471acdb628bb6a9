//! Bounded resolution cache with insertion-order eviction.
//!
//! Eviction is FIFO: reading an entry never refreshes it. The oldest inserted
//! key is dropped first once the cache is full.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::asset::Asset;

/// A cached resolution. `None` is a negative entry (asset not found).
pub type CachedAsset = Option<Arc<dyn Asset>>;

pub struct ResolutionCache {
    capacity: usize,
    entries: FxHashMap<String, CachedAsset>,
    order: VecDeque<String>,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Look up a key. The outer `Option` is hit/miss, the inner one is the
    /// cached (possibly negative) result.
    pub fn get(&self, key: &str) -> Option<CachedAsset> {
        self.entries.get(key).cloned()
    }

    /// Insert a new entry, evicting the oldest one first if the cache is
    /// full. Returns the evicted key, if any.
    ///
    /// An existing key keeps its original value and position.
    pub fn insert(&mut self, key: String, value: CachedAsset) -> Option<String> {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order.pop_front().inspect(|oldest| {
                self.entries.remove(oldest);
            })
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
