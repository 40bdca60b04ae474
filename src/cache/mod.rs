//! Cache Module
//!
//! In-memory store with fixed TTL, insertion-order capacity eviction and
//! lazy expiry. One store exists per upstream resource kind.

mod clock;
mod entry;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of entries held per resource kind
pub const DEFAULT_CAPACITY: usize = 1000;
