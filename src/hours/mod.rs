//! Business-hours window and the clock abstraction behind it.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

/// Source of the current instant, so time-dependent behavior is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant. Test double.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Attended-hours window: Monday through Friday, local hour in
/// `[open_hour, close_hour)`.
#[derive(Debug, Clone, Copy)]
pub struct BusinessHours {
    pub open_hour: u32,
    pub close_hour: u32,
    pub timezone: Tz,
}

impl BusinessHours {
    pub fn new(open_hour: u32, close_hour: u32, timezone: Tz) -> Self {
        Self {
            open_hour,
            close_hour,
            timezone,
        }
    }

    /// Whether a representative is attending at the given instant.
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.timezone);
        let weekday = local.weekday().number_from_monday(); // 1 = Mon .. 7 = Sun
        let hour = local.hour();

        weekday <= 5 && hour >= self.open_hour && hour < self.close_hour
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 18,
            timezone: chrono_tz::UTC,
        }
    }
}
