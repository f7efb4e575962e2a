//! Clock Module
//!
//! Time source abstraction injected into the cache at construction,
//! so expiration is testable without real wall-clock waits.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

// == Clock Trait ==
/// A time source reporting "now" as milliseconds since the Unix epoch.
///
/// Production code uses [`SystemClock`]; tests inject [`MockClock`] to
/// control time progression deterministically.
pub trait Clock {
    /// Returns the current instant in Unix milliseconds.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Wall-clock implementation backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

// == Mock Clock ==
/// Controllable clock for deterministic tests.
///
/// Cloned handles observe the same underlying time, so a test can keep one
/// handle for advancing time while the cache owns another.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ms: Arc<Mutex<u64>>,
}

impl MockClock {
    /// Creates a mock clock starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock clock starting at a specific instant.
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(Mutex::new(now_ms)),
        }
    }

    /// Advances the clock by the given number of milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        if let Ok(mut now) = self.now_ms.lock() {
            *now = now.saturating_add(millis);
        }
    }

    /// Jumps the clock to an absolute instant.
    pub fn set_millis(&self, millis: u64) {
        if let Ok(mut now) = self.now_ms.lock() {
            *now = millis;
        }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.lock().map(|now| *now).unwrap_or_default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_reports_epoch_millis() {
        let clock = SystemClock;
        // Jan 1 2020 in Unix milliseconds; any sane system clock is past this.
        assert!(clock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn test_mock_clock_starts_at_zero() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_mock_clock_starts_at_given_instant() {
        let clock = MockClock::at(5_000);
        assert_eq!(clock.now_ms(), 5_000);
    }

    #[test]
    fn test_mock_clock_advance() {
        let clock = MockClock::new();
        clock.advance_millis(100);
        clock.advance_millis(50);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn test_mock_clock_set() {
        let clock = MockClock::at(1_000);
        clock.set_millis(250);
        assert_eq!(clock.now_ms(), 250);
    }

    #[test]
    fn test_mock_clock_clones_share_time() {
        let clock = MockClock::new();
        let handle = clock.clone();

        handle.advance_millis(42);
        assert_eq!(clock.now_ms(), 42);
    }

    #[test]
    fn test_mock_clock_advance_saturates() {
        let clock = MockClock::at(u64::MAX - 1);
        clock.advance_millis(100);
        assert_eq!(clock.now_ms(), u64::MAX);
    }
}
