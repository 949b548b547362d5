//! Capacity Tracker Module
//!
//! Accounts used vs. maximum size in caller-defined units.

// == Capacity Tracker ==
/// Tracks how much of a fixed capacity is in use.
///
/// The tracker has no idea what is being measured. Items, bytes, or any other
/// unit works as long as callers add and remove in the same unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTracker {
    /// Fixed maximum
    capacity: u64,
    /// Currently accounted size
    used: u64,
}

impl CapacityTracker {
    // == Constructor ==
    /// Creates an empty tracker with the given maximum.
    pub fn new(capacity: u64) -> Self {
        Self { capacity, used: 0 }
    }

    // == Is Larger Than Capacity ==
    /// Returns true if an item of `size` can never fit, no matter how much
    /// is removed first. Does not depend on current usage.
    pub fn is_larger_than_capacity(&self, size: u64) -> bool {
        size > self.capacity
    }

    // == Add ==
    /// Accounts for `amount` more units if they fit.
    ///
    /// Returns false and leaves the tracker untouched when
    /// `used + amount` would exceed the capacity.
    pub fn add(&mut self, amount: u64) -> bool {
        match self.used.checked_add(amount) {
            Some(total) if total <= self.capacity => {
                self.used = total;
                true
            }
            _ => false,
        }
    }

    // == Remove ==
    /// Releases `amount` units, floored at zero.
    pub fn remove(&mut self, amount: u64) {
        self.used = self.used.saturating_sub(amount);
    }

    // == Accessors ==
    /// Returns the currently accounted size.
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Returns the fixed maximum.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Units still free before the next `add` has to fail.
    pub fn available(&self) -> u64 {
        self.capacity - self.used
    }
}
