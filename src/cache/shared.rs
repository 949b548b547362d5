//! Shared Cache Module
//!
//! Lock-wrapped handles for callers that need to share one cache.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{BoundedCache, CacheStats, Sizer};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle that serializes every operation on a [`BoundedCache`].
///
/// The lock is held for the whole lookup, loader call included, so two
/// concurrent misses for the same key load it once. Values are returned as
/// owned clones since no reference can outlive the lock.
pub struct SharedCache<K, V, L, S> {
    inner: Arc<Mutex<BoundedCache<K, V, L, S>>>,
}

impl<K, V, L, S> Clone for SharedCache<K, V, L, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, L, S> SharedCache<K, V, L, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: Sizer<V>,
{
    /// Takes ownership of `cache`.
    pub fn new(cache: BoundedCache<K, V, L, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`BoundedCache::get`].
    pub fn get<C, E>(&self, ctx: &C, key: &K) -> Result<V, E>
    where
        C: ?Sized,
        L: FnMut(&C, &K) -> std::result::Result<V, E>,
    {
        self.inner.lock().get(ctx, key).map(V::clone)
    }

    /// See [`BoundedCache::invalidate`].
    pub fn invalidate(&self, key: &K) -> bool {
        self.inner.lock().invalidate(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

// == Async Shared Cache ==
/// Like [`SharedCache`], but waits on a tokio mutex so async tasks yield
/// instead of blocking the runtime while another task holds the cache.
#[cfg(feature = "tokio")]
pub struct AsyncSharedCache<K, V, L, S> {
    inner: Arc<tokio::sync::Mutex<BoundedCache<K, V, L, S>>>,
}

#[cfg(feature = "tokio")]
impl<K, V, L, S> Clone for AsyncSharedCache<K, V, L, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "tokio")]
impl<K, V, L, S> AsyncSharedCache<K, V, L, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: Sizer<V>,
{
    pub fn new(cache: BoundedCache<K, V, L, S>) -> Self {
        Self {
            inner: Arc::new(tokio::sync::Mutex::new(cache)),
        }
    }

    /// See [`BoundedCache::get`]. The loader itself runs synchronously.
    pub async fn get<C, E>(&self, ctx: &C, key: &K) -> Result<V, E>
    where
        C: ?Sized,
        L: FnMut(&C, &K) -> std::result::Result<V, E>,
    {
        self.inner.lock().await.get(ctx, key).map(V::clone)
    }

    pub async fn invalidate(&self, key: &K) -> bool {
        self.inner.lock().await.invalidate(key)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }
}
