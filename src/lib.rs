//! Memo Cache - A generic memoizing cache
//!
//! Loads each key once through a caller-supplied loader and keeps the value
//! until it is invalidated or evicted. The bounded variant evicts least
//! recently used entries under a size budget measured in any unit.
//!
//! None of the core types are synchronized; use [`SharedCache`] to share one.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedCache, ByteLen, CacheStats, ItemCount, MemoStore, SharedCache, Sizer};
#[cfg(feature = "tokio")]
pub use cache::AsyncSharedCache;
pub use config::Config;
pub use error::{CacheError, Result};
