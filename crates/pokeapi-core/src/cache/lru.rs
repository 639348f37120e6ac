//! Bounded least-recently-used cache.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CacheLike, DEFAULT_CACHE_CAPACITY};

/// In-memory LRU cache bounded by `max` entries.
///
/// Both `set` and a successful `get` mark a key as most recently used. When an
/// insert pushes the size past `max`, exactly one entry (the least recently
/// used) is evicted, synchronously, inside that `set`.
#[derive(Debug)]
pub struct LruCache<V> {
    max: usize,
    state: Mutex<LruState<V>>,
}

#[derive(Debug)]
struct LruState<V> {
    entries: HashMap<String, Slot<V>>,
    /// Recency stamp -> key; the first entry is the least recently used.
    order: BTreeMap<u64, String>,
    clock: u64,
}

#[derive(Debug)]
struct Slot<V> {
    value: V,
    stamp: u64,
}

impl<V> LruState<V> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl<V: Clone> LruCache<V> {
    /// Create a cache holding at most `max` entries (at least one).
    pub fn new(max: usize) -> Self {
        Self {
            max: max.max(1),
            state: Mutex::new(LruState {
                entries: HashMap::new(),
                order: BTreeMap::new(),
                clock: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruState<V>> {
        // Every mutation leaves the maps consistent before it can panic, so a
        // poisoned lock still guards valid state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for LruCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<V: Clone + Send> CacheLike<V> for LruCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let mut state = self.lock();
        let stamp = state.tick();
        let slot = state.entries.get_mut(key)?;
        let previous = std::mem::replace(&mut slot.stamp, stamp);
        let value = slot.value.clone();
        state.order.remove(&previous);
        state.order.insert(stamp, key.to_string());
        Some(value)
    }

    fn set(&self, key: &str, value: V) {
        let mut state = self.lock();
        let stamp = state.tick();
        if let Some(old) = state.entries.insert(key.to_string(), Slot { value, stamp }) {
            state.order.remove(&old.stamp);
        }
        state.order.insert(stamp, key.to_string());

        if state.entries.len() > self.max {
            if let Some((_, oldest)) = state.order.pop_first() {
                state.entries.remove(&oldest);
                tracing::trace!(key = %oldest, "evicted least recently used cache entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_existing_value() {
        let c = LruCache::new(5);
        c.set("x", 1);
        c.set("x", 2);
        assert_eq!(c.get("x"), Some(2));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used_after_a_get() {
        let c = LruCache::new(2);
        c.set("a", "A");
        c.set("b", "B");
        // bump 'a'
        assert_eq!(c.get("a"), Some("A"));
        c.set("c", "C");

        assert_eq!(c.get("b"), None);
        assert_eq!(c.get("a"), Some("A"));
        assert_eq!(c.get("c"), Some("C"));
    }

    #[test]
    fn evicts_first_inserted_without_access() {
        let c = LruCache::new(2);
        c.set("k1", 1);
        c.set("k2", 2);
        c.set("k3", 3);

        assert_eq!(c.get("k1"), None);
        assert_eq!(c.get("k2"), Some(2));
        assert_eq!(c.get("k3"), Some(3));
    }

    #[test]
    fn replacing_a_key_refreshes_its_recency() {
        let c = LruCache::new(2);
        c.set("a", 1);
        c.set("b", 2);
        c.set("a", 10);
        c.set("c", 3);

        assert_eq!(c.get("b"), None);
        assert_eq!(c.get("a"), Some(10));
    }

    #[test]
    fn miss_has_no_side_effect_on_order() {
        let c = LruCache::new(2);
        c.set("a", 1);
        c.set("b", 2);
        assert_eq!(c.get("zzz"), None);
        c.set("c", 3);

        assert_eq!(c.get("a"), None);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn never_exceeds_bound_and_evicts_in_recency_order() {
        let max = 8;
        let c = LruCache::new(max);
        // Reference model: most recent at the back.
        let mut model: Vec<String> = Vec::new();

        for i in 0..200u32 {
            let key = format!("k{}", i % 13);
            if i % 3 == 0 {
                let hit = c.get(&key);
                if let Some(pos) = model.iter().position(|k| *k == key) {
                    assert_eq!(hit, Some(i % 13));
                    let k = model.remove(pos);
                    model.push(k);
                } else {
                    assert_eq!(hit, None);
                }
            } else {
                c.set(&key, i % 13);
                if let Some(pos) = model.iter().position(|k| *k == key) {
                    model.remove(pos);
                }
                model.push(key);
                if model.len() > max {
                    let evicted = model.remove(0);
                    assert_eq!(c.get(&evicted), None);
                }
            }
            assert!(c.len() <= max);
        }
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let c = LruCache::new(0);
        assert_eq!(c.capacity(), 1);
        c.set("a", 1);
        c.set("b", 2);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("b"), Some(2));
    }
}
