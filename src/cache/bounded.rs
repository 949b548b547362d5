//! Bounded Cache Module
//!
//! Size-aware LRU cache combining a memo store, a recency tracker and a
//! capacity tracker.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, CapacityTracker, MemoStore, RecencyTracker, Sizer};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Bounded Cache ==
/// Memoizing cache with LRU eviction under a size budget.
///
/// Every entry is sized with the cache's [`Sizer`]. After any successful
/// lookup the sizes of all resident entries add up to at most the capacity.
/// When a newly loaded value does not fit, least recently used entries are
/// evicted one at a time until it does.
///
/// The size measured on admission is recorded and released as is when the
/// entry leaves, so values whose size changes while resident cannot skew the
/// accounting.
///
/// A capacity of zero admits nothing, not even zero-size values.
///
/// Not synchronized: every lookup takes `&mut self`. Wrap it in a
/// [`SharedCache`](crate::cache::SharedCache) for shared access.
pub struct BoundedCache<K, V, L, S> {
    /// Memoized values and the loader
    store: MemoStore<K, V, L>,
    /// LRU order of resident keys
    recency: RecencyTracker<K>,
    /// Size each resident entry was admitted with
    sizes: HashMap<K, u64>,
    /// Size accounting
    limit: CapacityTracker,
    /// Measures values in capacity units
    sizer: S,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V, L, S> BoundedCache<K, V, L, S>
where
    K: Hash + Eq + Clone,
    S: Sizer<V>,
{
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum total size, in the sizer's units
    /// * `sizer` - Measures each value
    /// * `loader` - Called as `loader(ctx, key)` on every miss
    pub fn new(capacity: u64, sizer: S, loader: L) -> Self {
        Self {
            store: MemoStore::new(loader),
            recency: RecencyTracker::new(),
            sizes: HashMap::new(),
            limit: CapacityTracker::new(capacity),
            sizer,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty cache with the configured capacity.
    pub fn from_config(config: &Config, sizer: S, loader: L) -> Self {
        Self::new(config.capacity, sizer, loader)
    }

    // == Get ==
    /// Returns the value for `key`, loading and admitting it on a miss.
    ///
    /// # Errors
    /// - [`CacheError::Loader`] with the loader's error, unchanged. The cache
    ///   is left exactly as it was.
    /// - [`CacheError::InsufficientCapacity`] if the value can never fit.
    ///   Nothing is evicted in that case.
    pub fn get<C, E>(&mut self, ctx: &C, key: &K) -> Result<&V, E>
    where
        C: ?Sized,
        L: FnMut(&C, &K) -> std::result::Result<V, E>,
    {
        // Hit path
        if self.store.contains(key) {
            self.stats.record_hit();
            self.recency.touch(key);
            trace!("cache hit");
            return Ok(&self.store[key]);
        }

        // Miss path
        self.stats.record_miss();
        let value = match self.store.load(ctx, key) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_load_failure();
                return Err(CacheError::Loader(err));
            }
        };

        let size = self.sizer.size_of(&value);
        if !self.admit(size) {
            self.stats.record_rejection();
            return Err(CacheError::InsufficientCapacity);
        }

        self.sizes.insert(key.clone(), size);
        let value = self.store.insert(key.clone(), value);
        self.recency.touch(key);
        debug!(
            "cached entry of size {} (used {}/{})",
            size,
            self.limit.used(),
            self.limit.capacity()
        );
        Ok(value)
    }

    // == Admit ==
    /// Reserves `size` units, evicting LRU entries until it fits.
    ///
    /// Returns false without evicting anything if the value can never fit.
    fn admit(&mut self, size: u64) -> bool {
        if self.limit.capacity() == 0 || self.limit.is_larger_than_capacity(size) {
            warn!(
                "rejected entry of size {}: capacity is {}",
                size,
                self.limit.capacity()
            );
            return false;
        }

        while !self.limit.add(size) {
            let Some(victim) = self.recency.lru().cloned() else {
                warn!(
                    "nothing left to evict for entry of size {} (used {}/{})",
                    size,
                    self.limit.used(),
                    self.limit.capacity()
                );
                return false;
            };
            match self.remove_entry(&victim) {
                Some(freed) => {
                    self.stats.record_eviction();
                    debug!("evicted least recently used entry of size {}", freed);
                }
                None => {
                    // In the order but not resident; drop it so the loop moves on
                    warn!("dropping stale key from the recency order");
                    self.recency.remove(&victim);
                }
            }
        }
        true
    }

    // == Invalidate ==
    /// Removes `key` and releases its size.
    ///
    /// Returns whether the key was cached. The next lookup reloads it.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes an entry everywhere and releases the size it was admitted with.
    fn remove_entry(&mut self, key: &K) -> Option<u64> {
        let size = self.sizes.remove(key)?;
        self.store.remove(key);
        self.recency.remove(key);
        self.limit.remove(size);
        Some(size)
    }

    /// Returns the cached value without loading or touching it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.peek(key)
    }

    /// Returns true if `key` is resident.
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Total size of resident entries.
    pub fn used(&self) -> u64 {
        self.limit.used()
    }

    /// Maximum total size.
    pub fn capacity(&self) -> u64 {
        self.limit.capacity()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.store.len(), self.limit.used(), self.limit.capacity());
        stats
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> {
        self.recency.iter()
    }
}

impl<K, V, L, S> fmt::Debug for BoundedCache<K, V, L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("store", &self.store)
            .field("limit", &self.limit)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
