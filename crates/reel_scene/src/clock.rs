//! Clock sources
//!
//! Scenes never read time themselves; the caller samples a clock once per
//! tick and passes the value down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic, non-decreasing time in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction
#[derive(Clone, Copy, Debug)]
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
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Externally driven clock for fixed-step playback and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: AtomicU64::new(start.to_bits()),
        }
    }

    /// Jump to `time`; earlier times are ignored to keep the clock monotonic
    pub fn set(&self, time: f64) {
        if time > self.now() {
            self.bits.store(time.to_bits(), Ordering::Relaxed);
        }
    }

    /// Move forward by `dt` seconds
    pub fn advance(&self, dt: f64) {
        if dt > 0.0 {
            self.set(self.now() + dt);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(1.0);
        assert_eq!(clock.now(), 1.0);

        clock.advance(0.5);
        assert_eq!(clock.now(), 1.5);

        clock.set(0.2);
        assert_eq!(clock.now(), 1.5);

        clock.advance(-1.0);
        assert_eq!(clock.now(), 1.5);

        clock.set(4.0);
        assert_eq!(clock.now(), 4.0);
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
