//! Hash table with optional first-in-first-out eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Hasher used by memoization tables and the striped slot map.
#[cfg(feature = "fxhash")]
pub(crate) type CacheHasher = rustc_hash::FxBuildHasher;

/// Hasher used by memoization tables and the striped slot map.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type CacheHasher = ahash::RandomState;

/// Hasher used by memoization tables and the striped slot map.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type CacheHasher = std::collections::hash_map::RandomState;

/// Key-value storage behind the global lock of a memoization cache.
///
/// `insertion_order` holds exactly the keys of `entries`, oldest first, and
/// is only maintained when a capacity is set.
pub(super) struct Table<K, V> {
    entries: HashMap<K, V, CacheHasher>,
    insertion_order: VecDeque<K>,
    capacity: Option<NonZeroUsize>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(super) fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            entries: HashMap::with_hasher(CacheHasher::default()),
            insertion_order: VecDeque::new(),
            capacity,
        }
    }

    pub(super) fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Inserts `value`, evicting the oldest entries first when the table is full.
    ///
    /// Replacing the value of a present key keeps its position in the
    /// eviction order.
    pub(super) fn insert(&mut self, key: K, value: V) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }

        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity.get() {
                let Some(oldest) = self.insertion_order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
                tracing::debug!(capacity = capacity.get(), "evicted oldest memoized entry");
            }
            self.insertion_order.push_back(key.clone());
        }

        self.entries.insert(key, value);
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
