//! System clock adapter
//!
//! Production implementation of ClockPort using chrono's system time.

use chrono::{DateTime, Utc};

use chorequest_engine_ports::outbound::ClockPort;

/// System clock implementation using real time
///
/// Use in the composition root; tests use `FixedClock` or `MockClockPort`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
