//! Cache Module
//!
//! Memoizing caches built from three primitives: a capacity tracker, a
//! recency tracker and an unbounded memo store.

mod bounded;
mod capacity;
mod memo;
mod recency;
mod shared;
mod sizer;
mod stats;


// Re-export public types
pub use bounded::BoundedCache;
pub use capacity::CapacityTracker;
pub use memo::MemoStore;
pub use recency::RecencyTracker;
#[cfg(feature = "tokio")]
pub use shared::AsyncSharedCache;
pub use shared::SharedCache;
pub use sizer::{ByteLen, ItemCount, Sizer};
pub use stats::CacheStats;
