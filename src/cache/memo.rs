//! Memo Store Module
//!
//! Unbounded key-value storage that loads each missing key exactly once.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use tracing::{debug, trace};

// == Memo Store ==
/// Unbounded memoizing store.
///
/// On a miss the loader is called with the caller's context and the key.
/// A successful result is stored and returned; later lookups for the same
/// key return the stored value until it is invalidated. Nothing is ever
/// evicted, so the store grows with every distinct key it sees.
///
/// The store is not synchronized. Lookups take `&mut self`.
pub struct MemoStore<K, V, L> {
    /// Memoized values
    entries: HashMap<K, V>,
    /// Produces values for missing keys
    loader: L,
}

impl<K, V, L> MemoStore<K, V, L>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store around `loader`.
    ///
    /// # Arguments
    /// * `loader` - Called as `loader(ctx, key)` for every miss
    pub fn new(loader: L) -> Self {
        Self {
            entries: HashMap::new(),
            loader,
        }
    }

    // == Get ==
    /// Returns the memoized value for `key`, loading it on a miss.
    ///
    /// A failed load stores nothing and returns the loader's error as is.
    pub fn get<C, E>(&mut self, ctx: &C, key: &K) -> Result<&V, E>
    where
        C: ?Sized,
        L: FnMut(&C, &K) -> Result<V, E>,
    {
        if self.entries.contains_key(key) {
            trace!("memo hit");
            return Ok(&self.entries[key]);
        }

        let value = self.load(ctx, key)?;
        Ok(self.insert(key.clone(), value))
    }

    // == Load ==
    /// Calls the loader for `key` without memoizing the result.
    pub fn load<C, E>(&mut self, ctx: &C, key: &K) -> Result<V, E>
    where
        C: ?Sized,
        L: FnMut(&C, &K) -> Result<V, E>,
    {
        let result = (self.loader)(ctx, key);
        if result.is_err() {
            debug!("loader failed, nothing cached");
        }
        result
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: K, value: V) -> &V {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(value),
        }
    }

    // == Invalidate ==
    /// Drops the memoized value for `key`.
    ///
    /// Returns whether a value was removed. The next lookup reloads.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes and returns the memoized value for `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Returns the memoized value without loading.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V, L> Index<&K> for MemoStore<K, V, L>
where
    K: Hash + Eq,
{
    type Output = V;

    /// Panics if `key` is not memoized.
    fn index(&self, key: &K) -> &V {
        &self.entries[key]
    }
}

impl<K, V, L> fmt::Debug for MemoStore<K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoStore")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, PartialEq)]
    struct Intentional;

    #[test]
    fn test_memo_new() {
        let store: MemoStore<String, String, _> =
            MemoStore::new(|_: &(), key: &String| Ok::<_, Intentional>(key.clone()));
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_get_loads_missing_value() {
        let mut store =
            MemoStore::new(|_: &(), key: &String| Ok::<_, Intentional>(key.to_uppercase()));

        let value = store.get(&(), &"echo".to_string()).unwrap();
        assert_eq!(value, "ECHO");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_does_not_reload_cached_value() {
        let calls = Cell::new(0);
        let mut store = MemoStore::new(|_: &(), key: &u32| {
            calls.set(calls.get() + 1);
            Ok::<_, Intentional>(key * 10)
        });

        assert_eq!(store.get(&(), &7), Ok(&70));
        assert_eq!(store.get(&(), &7), Ok(&70));
        assert_eq!(store.get(&(), &7), Ok(&70));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_get_failure_caches_nothing() {
        let calls = Cell::new(0);
        let mut store = MemoStore::new(|_: &(), _: &u32| {
            calls.set(calls.get() + 1);
            Err::<u32, _>(Intentional)
        });

        assert_eq!(store.get(&(), &1), Err(Intentional));
        assert!(!store.contains(&1));

        // Not memoized, so the loader runs again
        assert_eq!(store.get(&(), &1), Err(Intentional));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_get_forwards_context() {
        let mut store = MemoStore::new(|prefix: &str, key: &u32| {
            Ok::<_, Intentional>(format!("{prefix}-{key}"))
        });

        assert_eq!(store.get("page", &3).unwrap(), "page-3");
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let calls = Cell::new(0);
        let mut store = MemoStore::new(|_: &(), key: &u32| {
            calls.set(calls.get() + 1);
            Ok::<_, Intentional>(*key)
        });

        store.get(&(), &1).unwrap();
        assert!(store.invalidate(&1));
        store.get(&(), &1).unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_invalidate_missing_key() {
        let mut store: MemoStore<u32, u32, _> =
            MemoStore::new(|_: &(), key: &u32| Ok::<_, Intentional>(*key));
        assert!(!store.invalidate(&1));
    }

    #[test]
    fn test_load_does_not_memoize() {
        let mut store = MemoStore::new(|_: &(), key: &u32| Ok::<_, Intentional>(*key + 1));

        assert_eq!(store.load(&(), &1), Ok(2));
        assert!(store.peek(&1).is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut store: MemoStore<u32, u32, _> =
            MemoStore::new(|_: &(), key: &u32| Ok::<_, Intentional>(*key));

        store.insert(1, 10);
        assert_eq!(*store.insert(1, 20), 20);
        assert_eq!(store[&1], 20);
        assert_eq!(store.len(), 1);
    }
}
