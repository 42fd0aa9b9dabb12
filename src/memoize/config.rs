//! Configuration for memoized functions.

use std::num::NonZeroUsize;

/// Multiplier applied to the CPU count when no shard count is configured.
const SHARDS_PER_CPU: usize = 4;

/// Smallest effective shard count.
const MIN_SHARD_COUNT: usize = 2;

/// Largest effective shard count.
const MAX_SHARD_COUNT: usize = 1 << 16;

/// How a memoization cache guards its check-compute-populate sequence.
///
/// Both strategies guarantee that a key is computed at most once while it
/// stays in the cache. They differ in what concurrent callers wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LockStrategy {
    /// A single lock held across lookup, computation and insertion.
    ///
    /// Every call into the memoized function is serialized, including calls
    /// for unrelated keys and cache hits issued while a computation runs.
    Global,
    /// Keys are spread across shards and each key owns its own slot lock.
    ///
    /// Callers only wait for a computation of the same key, so distinct keys
    /// are computed in parallel.
    #[default]
    Striped,
}

/// Settings for [`Function::memoized_with`](crate::function::Function::memoized_with).
///
/// The default configuration uses [`LockStrategy::Striped`], an unbounded
/// cache and a shard count derived from the number of CPUs.
///
/// # Examples
///
/// ```rust
/// use fnwrap::memoize::{LockStrategy, MemoConfig};
/// use std::num::NonZeroUsize;
///
/// let config = MemoConfig::new()
///     .with_strategy(LockStrategy::Global)
///     .with_capacity(NonZeroUsize::new(128).unwrap());
///
/// assert_eq!(config.strategy(), LockStrategy::Global);
/// assert_eq!(config.capacity().map(NonZeroUsize::get), Some(128));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MemoConfig {
    strategy: LockStrategy,
    capacity: Option<NonZeroUsize>,
    shard_count: Option<NonZeroUsize>,
}

impl MemoConfig {
    /// Returns the default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            strategy: LockStrategy::Striped,
            capacity: None,
            shard_count: None,
        }
    }

    /// Returns a configuration using a single global lock, the way a plain
    /// synchronized cache behaves.
    #[inline]
    pub const fn global() -> Self {
        Self::new().with_strategy(LockStrategy::Global)
    }

    /// Sets the lock strategy.
    #[inline]
    pub const fn with_strategy(mut self, strategy: LockStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Bounds the cache to roughly `capacity` entries.
    ///
    /// Once full, the oldest inserted entry is evicted first. An evicted key
    /// is computed again on its next call, so the at-most-once guarantee only
    /// holds while a key stays cached.
    ///
    /// The bound is exact for both strategies. Keys whose computation failed
    /// never count toward it.
    #[inline]
    pub const fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the number of shards used by [`LockStrategy::Striped`].
    ///
    /// The value is clamped to `2..=65536` and rounded up to a power of two.
    /// Ignored by [`LockStrategy::Global`].
    #[inline]
    pub const fn with_shard_count(mut self, shard_count: NonZeroUsize) -> Self {
        self.shard_count = Some(shard_count);
        self
    }

    /// Returns the lock strategy.
    #[inline]
    pub const fn strategy(&self) -> LockStrategy {
        self.strategy
    }

    /// Returns the configured capacity, or `None` for an unbounded cache.
    #[inline]
    pub const fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Returns the effective shard count: the configured value, or four
    /// shards per CPU, clamped to `2..=65536` and rounded up to a power of two.
    pub fn shard_count(&self) -> usize {
        self.shard_count
            .map_or_else(
                || num_cpus::get().saturating_mul(SHARDS_PER_CPU),
                NonZeroUsize::get,
            )
            .clamp(MIN_SHARD_COUNT, MAX_SHARD_COUNT)
            .next_power_of_two()
    }
}
