//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A decoded value together with the instant it was inserted.
///
/// Entries are never mutated once stored; refreshing a key replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion instant, taken from the store's clock
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
        }
    }

    // == Age ==
    /// Returns how long the entry has been stored as of `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to the TTL, so a fully elapsed TTL is never served.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", now);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.age(now), Duration::ZERO);
        assert!(!entry.is_expired(now, TTL));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now);

        assert!(!entry.is_expired(now + Duration::from_secs(59), TTL));
        assert!(entry.is_expired(now + Duration::from_secs(61), TTL));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now);

        // Expired exactly when the TTL has fully elapsed
        assert!(entry.is_expired(now + TTL, TTL), "Entry should be expired at boundary");
    }

    #[test]
    fn test_age_before_insertion_is_zero() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now + Duration::from_secs(5));

        assert_eq!(entry.age(now), Duration::ZERO);
    }
}
