//! Clock abstraction port for time operations
//!
//! Services that need the current time inject this port rather than calling
//! `Utc::now()` directly, enabling deterministic tests and reproducible
//! audit timestamps.

use chrono::{DateTime, Utc};

/// Time operations abstraction for engine-side services.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ClockPort: Send + Sync {
    /// Get current time as DateTime<Utc>
    fn now(&self) -> DateTime<Utc>;

    /// Format current time as RFC3339 string
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339()
    }
}

/// Fixed clock for deterministic testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock pinned to the Unix epoch.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_constant() {
        let clock = FixedClock::epoch();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_rfc3339_formatting() {
        let clock = FixedClock::epoch();
        assert_eq!(clock.now_rfc3339(), "1970-01-01T00:00:00+00:00");
    }
}
