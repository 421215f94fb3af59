//! Clock abstraction over local time and sleeping.
//!
//! The scheduler only ever asks "what time is it locally" and "wait a
//! moment"; putting both behind a trait lets tests run the periodic loop
//! against simulated time.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};

/// A source of local time that can also pause the caller.
pub trait Clock {
    /// The current local date and time.
    fn now(&mut self) -> NaiveDateTime;

    /// Pause for roughly the given duration.
    fn sleep(&mut self, duration: Duration);
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A simulated clock: `sleep` advances time instantly.
#[derive(Debug, Clone)]
pub struct TestClock {
    now: NaiveDateTime,
}

impl TestClock {
    /// A clock frozen at the given start time.
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: start }
    }

    /// Jump directly to a new time.
    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }
}

impl Clock for TestClock {
    fn now(&mut self) -> NaiveDateTime {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::zero());
        self.now += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_clock_advances_on_sleep() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut clock = TestClock::new(start);
        clock.sleep(Duration::from_secs(90));
        assert_eq!(clock.now(), start + TimeDelta::seconds(90));
    }
}
