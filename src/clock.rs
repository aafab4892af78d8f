//! Monotonic time sources for the click and proximity timers.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic clock. Readings are offsets from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
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
}

/// Hand-driven clock for replaying recorded input and for tests.
///
/// Clones share the same time, so a caller can keep one handle and advance
/// it while the synthesizer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Restartable elapsed-time counter over an injected clock.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Duration,
}

impl Stopwatch {
    pub fn start(clock: &dyn Clock) -> Self {
        Self { started: clock.now() }
    }

    pub fn restart(&mut self, clock: &dyn Clock) {
        self.started = clock.now();
    }

    pub fn elapsed(&self, clock: &dyn Clock) -> Duration {
        clock.now().saturating_sub(self.started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance_ms(150);
        assert_eq!(clock.now(), Duration::from_millis(150));
    }

    #[test]
    fn test_stopwatch_restart() {
        let clock = ManualClock::new();
        let mut watch = Stopwatch::start(&clock);
        clock.advance_ms(300);
        assert_eq!(watch.elapsed(&clock), Duration::from_millis(300));
        watch.restart(&clock);
        clock.advance_ms(20);
        assert_eq!(watch.elapsed(&clock), Duration::from_millis(20));
    }
}
