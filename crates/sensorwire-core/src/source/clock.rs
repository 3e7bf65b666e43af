//! Monotonic time for bounded waits.
//!
//! Deadlines are computed from [`Clock::now`] and waiting goes through
//! [`Clock::pause`], so a [`ManualClock`] can drive timeouts in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the clock's origin. Never decreases.
    fn now(&self) -> Duration;

    /// Yield for roughly `duration`.
    fn pause(&self, duration: Duration);

    fn now_ms(&self) -> u64 {
        u64::try_from(self.now().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when paused or advanced explicitly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn pause(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};
    use std::time::Duration;

    #[test]
    fn manual_clock_moves_only_when_paused() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.pause(Duration::from_millis(15));
        clock.advance(Duration::from_millis(5));
        assert_eq!(clock.now_ms(), 20);
    }

    #[test]
    fn system_clock_pause_advances_now() {
        let clock = SystemClock::new();
        let before = clock.now();
        clock.pause(Duration::from_millis(2));
        let after = clock.now();
        assert!(after >= before + Duration::from_millis(2));
        assert!(clock.now() >= after);
    }
}
