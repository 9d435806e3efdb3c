//! Cache for rendered selection backgrounds and icons.

use std::collections::HashMap;
use tracing::debug;

/// Default cost limit: 50 MB of pixel data.
pub const DEFAULT_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Selection {
        width: u32,
        height: u32,
    },
    Icon {
        name: String,
        size: u32,
        /// Device pixel ratio in percent.
        pixel_ratio: u32,
    },
}

impl CacheKey {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn icon(name: &str, size: u32, pixel_ratio: f64) -> Self {
        CacheKey::Icon {
            name: name.to_string(),
            size,
            pixel_ratio: (pixel_ratio * 100.0).round() as u32,
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    cost: usize,
    last_used: u64,
}

/// Cost bounded cache, evicting least recently used entries. Never consulted
/// for correctness: the owner clears it whenever what it renders changes.
#[derive(Debug)]
pub struct RenderCache<V> {
    entries: HashMap<CacheKey, Entry<V>>,
    limit: usize,
    used: usize,
    clock: u64,
}

impl<V> Default for RenderCache<V> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl<V> RenderCache<V> {
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            limit,
            used: 0,
            clock: 0,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<&V> {
        self.clock += 1;
        let entry = self.entries.get_mut(key)?;
        entry.last_used = self.clock;
        Some(&entry.value)
    }

    /// Store `value`. Entries costing more than the whole limit are refused.
    pub fn insert(&mut self, key: CacheKey, value: V, cost: usize) -> bool {
        if cost > self.limit {
            return false;
        }
        self.remove(&key);
        while self.used + cost > self.limit && self.evict_oldest() {}
        self.clock += 1;
        self.used += cost;
        self.entries.insert(
            key,
            Entry {
                value,
                cost,
                last_used: self.clock,
            },
        );
        true
    }

    pub fn remove(&mut self, key: &CacheKey) {
        if let Some(entry) = self.entries.remove(key) {
            self.used -= entry.cost;
        }
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("Clearing render cache ({} entries)", self.entries.len());
        }
        self.entries.clear();
        self.used = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    fn evict_oldest(&mut self) -> bool {
        let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone())
        else {
            return false;
        };
        self.remove(&key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(width: u32) -> CacheKey {
        CacheKey::Selection { width, height: 10 }
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = RenderCache::with_limit(100);
        cache.insert(selection(1), "a", 40);
        cache.insert(selection(2), "b", 40);
        assert_eq!(cache.get(&selection(1)), Some(&"a"));
        cache.insert(selection(3), "c", 40);

        assert!(cache.get(&selection(2)).is_none());
        assert!(cache.get(&selection(1)).is_some());
        assert_eq!(cache.used(), 80);
    }

    #[test]
    fn test_oversized_entries_are_refused() {
        let mut cache = RenderCache::with_limit(10);
        assert!(!cache.insert(selection(1), (), 11));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_icon_keys_distinguish_pixel_ratio() {
        assert_ne!(CacheKey::icon("app", 36, 1.0), CacheKey::icon("app", 36, 2.0));
        assert_eq!(CacheKey::icon("app", 36, 1.5), CacheKey::icon("app", 36, 1.5));
    }

    #[test]
    fn test_clear_resets_cost() {
        let mut cache = RenderCache::default();
        cache.insert(selection(1), 1u8, 1000);
        cache.clear();
        assert_eq!(cache.used(), 0);
        assert!(cache.is_empty());
    }
}
