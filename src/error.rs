//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Error returned by a bounded cache lookup.
///
/// `E` is the loader's own error type. It is carried as-is so callers can
/// match on exactly what their loader produced.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError<E> {
    /// The loader failed; the value is the loader's error, unmodified
    #[error(transparent)]
    Loader(E),

    /// The item can never be admitted, even after evicting everything else
    #[error("insufficient capacity")]
    InsufficientCapacity,
}

impl<E> CacheError<E> {
    // == Is Insufficient Capacity ==
    /// Returns true if this is the engine's own capacity error.
    pub fn is_insufficient_capacity(&self) -> bool {
        matches!(self, CacheError::InsufficientCapacity)
    }

    // == Into Loader Error ==
    /// Returns the loader's error, or None for engine errors.
    pub fn into_loader_error(self) -> Option<E> {
        match self {
            CacheError::Loader(err) => Some(err),
            CacheError::InsufficientCapacity => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache lookups.
pub type Result<T, E> = std::result::Result<T, CacheError<E>>;
