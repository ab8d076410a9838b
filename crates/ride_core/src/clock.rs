//! Time source for pricing.
//!
//! Rush-hour surcharges depend on the local hour of day, so pricing never
//! reads the wall clock itself. Callers pass a timestamp, and the ride
//! request workflow obtains it from an injected [`Clock`].

use chrono::{DateTime, FixedOffset, Local, TimeZone, Timelike};

/// Supplies the current local time.
pub trait Clock: Send + Sync {
    /// Current time carrying the caller's local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the operating system clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Always returns the same instant. Used to pin rush-hour behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Hour of day (0–23) in the timestamp's own time zone.
pub fn local_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    now.hour()
}
