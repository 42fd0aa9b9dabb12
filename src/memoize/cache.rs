//! Memoization caches keyed by argument tuples.

use std::collections::VecDeque;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;

use super::config::{LockStrategy, MemoConfig};
use super::table::{CacheHasher, Table};

/// Type-erased view of a cache, kept by memoized functions for inspection.
///
/// Its presence on a [`Function`](crate::function::Function) is also the
/// marker that the function is already memoized.
pub(crate) trait CacheHandle: Send + Sync {
    /// Number of keys whose result has been computed and is still cached.
    fn len(&self) -> usize;

    fn config(&self) -> MemoConfig;
}

/// A result cache guarding each key so it is computed at most once.
pub(crate) struct MemoCache<K, V> {
    store: Store<K, V>,
    config: MemoConfig,
}

enum Store<K, V> {
    Global(Mutex<Table<K, V>>),
    Striped(Striped<K, V>),
}

/// Per-key result cell. `None` until a computation succeeds.
type Slot<V> = Mutex<Option<V>>;

/// Keys map to slots in a sharded `DashMap`. Shard locks are only held to
/// find, create or remove a slot, never while computing.
///
/// `filled` counts the slots in `slots` holding a value. When bounded,
/// `eviction` lists exactly the keys of those slots, oldest first.
struct Striped<K, V> {
    slots: DashMap<K, Arc<Slot<V>>, CacheHasher>,
    filled: AtomicUsize,
    eviction: Option<Eviction<K>>,
}

struct Eviction<K> {
    capacity: NonZeroUsize,
    order: Mutex<VecDeque<K>>,
}

/// Discards the slot of `key` when dropped while armed, so a failed or
/// panicking computation leaves no entry behind.
///
/// Declared before the slot and its lock guard, so it runs after both are
/// released.
struct UnfilledSlotGuard<'a, K: Eq + Hash, V> {
    striped: &'a Striped<K, V>,
    key: &'a K,
    armed: bool,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new(config: MemoConfig) -> Self {
        let store = match config.strategy() {
            LockStrategy::Global => Store::Global(Mutex::new(Table::new(config.capacity()))),
            LockStrategy::Striped => {
                Store::Striped(Striped::new(config.shard_count(), config.capacity()))
            }
        };

        tracing::debug!(
            strategy = ?config.strategy(),
            capacity = config.capacity().map(NonZeroUsize::get),
            shard_count = config.shard_count(),
            "created memoization cache"
        );

        Self { store, config }
    }

    /// Returns the cached value for `key`, or computes, caches and returns it.
    ///
    /// `compute` receives a clone of the key. An `Err` is returned to the
    /// caller and leaves nothing cached, so the next call for the same key
    /// computes again. A panic in `compute` behaves the same way.
    pub(crate) fn get_or_try_compute<E>(
        &self,
        key: K,
        compute: impl FnOnce(K) -> Result<V, E>,
    ) -> Result<V, E> {
        match &self.store {
            Store::Global(table) => {
                let mut table = table.lock();
                if let Some(value) = table.get(&key) {
                    tracing::trace!("memoization cache hit");
                    return Ok(value.clone());
                }

                tracing::trace!("memoization cache miss");
                let value = compute(key.clone()).inspect_err(|_| {
                    tracing::trace!("computation failed, key left uncached");
                })?;
                table.insert(key, value.clone());
                Ok(value)
            }
            Store::Striped(striped) => striped.get_or_try_compute(key, compute),
        }
    }
}

impl<K, V> Striped<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(shard_count: usize, capacity: Option<NonZeroUsize>) -> Self {
        Self {
            slots: DashMap::with_hasher_and_shard_amount(CacheHasher::default(), shard_count),
            filled: AtomicUsize::new(0),
            eviction: capacity.map(|capacity| Eviction {
                capacity,
                order: Mutex::new(VecDeque::with_capacity(capacity.get().min(1024))),
            }),
        }
    }

    fn slot_for(&self, key: &K) -> Arc<Slot<V>> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(slot.value());
        }
        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)));
        Arc::clone(slot.value())
    }

    fn get_or_try_compute<E>(
        &self,
        key: K,
        compute: impl FnOnce(K) -> Result<V, E>,
    ) -> Result<V, E> {
        let guard = UnfilledSlotGuard {
            striped: self,
            key: &key,
            armed: true,
        };
        let slot = self.slot_for(&key);
        let mut cell = slot.lock();
        if let Some(value) = cell.as_ref() {
            tracing::trace!("memoization cache hit");
            guard.disarm();
            return Ok(value.clone());
        }

        tracing::trace!("memoization cache miss");
        let value = compute(key.clone()).inspect_err(|_| {
            tracing::trace!("computation failed, key left uncached");
        })?;
        *cell = Some(value.clone());
        self.filled.fetch_add(1, Ordering::Relaxed);
        guard.disarm();
        drop(cell);

        self.record_filled(key);
        Ok(value)
    }

    /// Appends a newly filled key to the eviction order and evicts the
    /// oldest keys beyond capacity.
    fn record_filled(&self, key: K) {
        let Some(eviction) = &self.eviction else {
            return;
        };

        let mut order = eviction.order.lock();
        order.push_back(key);
        while order.len() > eviction.capacity.get() {
            let Some(oldest) = order.pop_front() else {
                break;
            };
            if self.slots.remove(&oldest).is_some() {
                self.filled.fetch_sub(1, Ordering::Relaxed);
            }
            tracing::debug!(capacity = eviction.capacity.get(), "evicted oldest memoized entry");
        }
    }
}

impl<K: Eq + Hash, V> Striped<K, V> {
    /// Removes the slot of `key` if it is empty and nobody else holds it.
    ///
    /// Callers still waiting on the slot hold a reference, and one of them
    /// discards it after its own attempt.
    fn discard_unfilled(&self, key: &K) {
        let removed = self.slots.remove_if(key, |_, slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_some_and(|cell| cell.is_none())
        });
        if removed.is_some() {
            tracing::trace!("discarded slot of failed computation");
        }
    }

    fn len(&self) -> usize {
        self.filled.load(Ordering::Relaxed)
    }
}

impl<K: Eq + Hash, V> UnfilledSlotGuard<'_, K, V> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<K: Eq + Hash, V> Drop for UnfilledSlotGuard<'_, K, V> {
    fn drop(&mut self) {
        if self.armed {
            self.striped.discard_unfilled(self.key);
        }
    }
}

impl<K, V> CacheHandle for MemoCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn len(&self) -> usize {
        match &self.store {
            Store::Global(table) => table.lock().len(),
            Store::Striped(striped) => striped.len(),
        }
    }

    fn config(&self) -> MemoConfig {
        self.config
    }
}
