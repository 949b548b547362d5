//! Recency Tracker Module
//!
//! Implements Least Recently Used ordering for cache eviction.

use std::collections::HashMap;
use std::hash::Hash;

// == Slot ==
/// A linked slot in the recency arena.
#[derive(Debug)]
struct Slot<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in arena slots linked into a doubly linked list where:
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// A side index maps each key to its slot, so touch, remove and peek are O(1).
#[derive(Debug)]
pub struct RecencyTracker<K> {
    /// Arena of slots, `None` for freed ones
    slots: Vec<Option<Slot<K>>>,
    /// Key to slot position
    index: HashMap<K, usize>,
    /// Freed slot positions available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> Default for RecencyTracker<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K: Hash + Eq + Clone> RecencyTracker<K> {
    // == Constructor ==
    /// Creates a new empty recency tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used (moves to tail).
    ///
    /// If key exists, unlinks it first then appends to tail.
    /// If key is new, allocates a slot and appends it.
    pub fn touch(&mut self, key: &K) {
        if let Some(&idx) = self.index.get(key) {
            if self.tail != Some(idx) {
                self.unlink(idx);
                self.push_back(idx);
            }
            return;
        }

        let idx = self.alloc(Slot {
            key: key.clone(),
            prev: None,
            next: None,
        });
        self.push_back(idx);
        self.index.insert(key.clone(), idx);
    }

    // == Remove ==
    /// Removes a key from the tracker.
    ///
    /// Returns true if the key was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.slots[idx] = None;
                self.free.push(idx);
                true
            }
            None => false,
        }
    }

    // == LRU ==
    /// Returns the least recently used key without removing it.
    ///
    /// Returns None if tracker is empty.
    pub fn lru(&self) -> Option<&K> {
        self.head
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|slot| &slot.key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Returns true if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Iter ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: &self.slots,
            next: self.head,
        }
    }

    fn alloc(&mut self, slot: Slot<K>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    /// Links a detached slot in at the tail.
    fn push_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = old_tail;
            slot.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = self.slots[tail_idx].as_mut() {
                    tail.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Detaches a slot from its neighbours, fixing head and tail.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_slot) = self.slots[prev_idx].as_mut() {
                    prev_slot.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_slot) = self.slots[next_idx].as_mut() {
                    next_slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = None;
            slot.next = None;
        }
    }
}

// == Iterator ==
/// Iterator over tracked keys, least recently used first.
pub struct Iter<'a, K> {
    slots: &'a [Option<Slot<K>>],
    next: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slots[self.next?].as_ref()?;
        self.next = slot.next;
        Some(&slot.key)
    }
}
