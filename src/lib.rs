//! Aged Cache - a bounded expiring key/value cache
//!
//! Entries are inserted with a per-entry retention period in milliseconds
//! and become invisible once it elapses. Expired entries are reclaimed
//! lazily by read operations; a capacity bound is enforced by evicting the
//! entry with the globally earliest expiry instant.
//!
//! A [`Clock`] is injected at construction, so expiry behavior is testable
//! with [`MockClock`] instead of wall-clock waits.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;

pub use cache::{AgedCache, CacheStats};
pub use clock::{Clock, MockClock, SystemClock};
pub use config::CacheConfig;
pub use error::CacheError;
