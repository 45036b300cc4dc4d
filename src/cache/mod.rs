//! Response Cache Module
//!
//! Bounded, process-wide store for model responses with strict FIFO eviction.

mod entry;
mod fifo;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

pub use entry::CacheEntry;
pub use fifo::InsertionQueue;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Capacity of the backend-wide response cache.
pub const DEFAULT_CAPACITY: usize = 100;
