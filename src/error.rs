//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// The runtime failure surface is deliberately narrow: lookups that miss or
/// hit an expired entry report absence through `Option`, not an error, and
/// key validity is enforced at compile time by the `Hash + Eq` bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configured capacity cannot hold a single entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
