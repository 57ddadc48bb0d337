//! Tick Sources
//!
//! Loggers stamp entries with a free-running 32-bit tick counter supplied
//! by the platform (a hardware timer, a SysTick counter, a host clock).

use std::time::{Duration, Instant};

/// Free-running 32-bit tick counter
pub trait TickSource {
    fn ticks(&mut self) -> u32;
}

impl<F: FnMut() -> u32> TickSource for F {
    fn ticks(&mut self) -> u32 {
        self()
    }
}

/// Host clock ticking once per `period`, wrapping at 2^32
#[derive(Debug, Clone)]
pub struct InstantTicks {
    origin: Instant,
    period: Duration,
}

impl InstantTicks {
    /// Start counting from now
    ///
    /// A zero `period` is treated as one nanosecond.
    pub fn new(period: Duration) -> Self {
        Self {
            origin: Instant::now(),
            period: period.max(Duration::from_nanos(1)),
        }
    }

    /// Tick period in use
    pub fn period(&self) -> Duration {
        self.period
    }

    fn ticks_at(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.origin).as_nanos();
        // Truncation keeps the low 32 bits, i.e. the counter wraps
        (elapsed / self.period.as_nanos()) as u32
    }
}

impl Default for InstantTicks {
    /// 10 ms ticks
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

impl TickSource for InstantTicks {
    fn ticks(&mut self) -> u32 {
        self.ticks_at(Instant::now())
    }
}
