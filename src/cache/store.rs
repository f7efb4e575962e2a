//! Cache Store Module
//!
//! Main cache engine combining the bucket table with per-entry retention,
//! read-triggered expiry sweeps, and earliest-expiry eviction at capacity.

use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{BucketTable, CacheStats, Entry};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Aged Cache ==
/// Bounded key/value cache whose entries age out after a per-entry
/// retention period.
///
/// Expired entries are reclaimed lazily: `get` unlinks expired entries it
/// scans past, and `size`/`is_empty` sweep every bucket. There is no
/// background task; the cost of neglect is paid by the next reader.
///
/// The engine assumes exclusive single-owner access (every operation takes
/// `&mut self`). Callers needing shared access must wrap it themselves.
///
/// # Type Parameters
/// - `K`: Key type (must be `Hash + Eq`)
/// - `V`: Value type (`Clone` required only by `get`)
/// - `C`: Clock type for expiry decisions (defaults to [`SystemClock`])
#[derive(Debug)]
pub struct AgedCache<K, V, C = SystemClock>
where
    K: Hash + Eq,
    C: Clock,
{
    /// Hash-indexed entry storage
    table: BucketTable<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Time source for expiry decisions
    clock: C,
}

impl<K, V> AgedCache<K, V, SystemClock>
where
    K: Hash + Eq,
{
    // == Constructor ==
    /// Creates a cache with the default capacity, bound to the system
    /// wall clock.
    pub fn new() -> Self {
        Self::from_parts(CacheConfig::default(), SystemClock)
    }
}

impl<K, V> Default for AgedCache<K, V, SystemClock>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AgedCache<K, V, C>
where
    K: Hash + Eq,
    C: Clock,
{
    /// Creates a cache with the default capacity and an injected clock.
    pub fn with_clock(clock: C) -> Self {
        Self::from_parts(CacheConfig::default(), clock)
    }

    /// Creates a cache from an explicit configuration and clock.
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::error::CacheError)
    /// if the configured capacity is zero.
    pub fn with_config(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: CacheConfig, clock: C) -> Self {
        Self {
            table: BucketTable::new(config.capacity),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Put ==
    /// Stores a key-value pair retained for `retention_ms` milliseconds.
    ///
    /// The entry expires at `now + retention_ms`; a zero retention makes it
    /// unreadable from the insertion instant on. Insertion prepends to the
    /// bucket chain, so a repeated key shadows its older entries rather
    /// than overwriting them.
    ///
    /// If the insertion pushes the entry count over capacity, exactly one
    /// entry is evicted: the one with the globally earliest expiry instant.
    pub fn put(&mut self, key: K, value: V, retention_ms: u64) {
        let now_ms = self.clock.now_ms();
        self.table.insert(Entry::new(key, value, now_ms, retention_ms));

        if self.table.len() > self.table.capacity() {
            if let Some(evicted) = self.table.remove_earliest_expiring() {
                self.stats.record_eviction();
                debug!(
                    expires_at = evicted.expires_at,
                    "evicted earliest-expiring entry at capacity"
                );
            }
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the newest live value stored under the key, or `None` on a
    /// miss or when every matching entry has expired. Expired entries for
    /// the key are unlinked while scanning, which can surface an older
    /// still-live duplicate.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let now_ms = self.clock.now_ms();
        let (found, unlinked) = self.table.find_live(key, now_ms);
        if unlinked > 0 {
            self.stats.record_expirations(unlinked as u64);
            trace!(unlinked, "unlinked expired entries during lookup");
        }

        match found {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Size ==
    /// Returns the number of live entries, sweeping out expired ones.
    ///
    /// Every bucket chain is walked and entries at or past their expiry
    /// instant are dropped before counting.
    pub fn size(&mut self) -> usize {
        let now_ms = self.clock.now_ms();
        let removed = self.table.sweep(now_ms);
        if removed > 0 {
            self.stats.record_expirations(removed as u64);
            debug!(removed, "sweep dropped expired entries");
        }
        self.table.len()
    }

    // == Is Empty ==
    /// Returns true if no live entries remain.
    ///
    /// Triggers the same full sweep as [`size`](Self::size).
    pub fn is_empty(&mut self) -> bool {
        self.size() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
}
