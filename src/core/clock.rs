//! Time sources for stamping recorded frames.
//!
//! The recorder only needs monotonic instants; the trait lets tests and
//! synthetic log generation drive time explicitly instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of monotonic instants.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same time, so a test can keep one handle while the
/// recorder owns another.
///
/// ```
/// use cloudlog::core::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(50));
/// assert_eq!(clock.now() - start, Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed_us: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock frozen at `base`.
    pub fn starting_at(base: Instant) -> Self {
        Self {
            base,
            elapsed_us: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move time forward, saturating at `u64::MAX` microseconds.
    pub fn advance(&self, by: Duration) {
        let by_us = micros(by);
        // Closure always returns Some, so the update cannot fail
        let _ = self
            .elapsed_us
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |us| {
                Some(us.saturating_add(by_us))
            });
    }

    /// Set the time elapsed since `base`, saturating at `u64::MAX` microseconds.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.elapsed_us.store(micros(elapsed), Ordering::SeqCst);
    }

    /// Time elapsed since `base`.
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us.load(Ordering::SeqCst))
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}
