//! Time management utilities

use std::time::{Duration, Instant};

/// Simulated millisecond clock advanced a fixed amount per frame
///
/// The platformer measures its jump cool-down against this counter rather
/// than wall time, so replays are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    now_ms: u64,
    period_ms: u64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock at zero that advances `period_ms` per tick
    pub const fn new(period_ms: u64) -> Self {
        Self {
            now_ms: 0,
            period_ms,
            frame_count: 0,
        }
    }

    /// Advance by one frame
    pub fn tick(&mut self) {
        self.now_ms += self.period_ms;
        self.frame_count += 1;
    }

    /// Current simulated time in milliseconds
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Milliseconds elapsed since `earlier`
    pub const fn since(&self, earlier: u64) -> u64 {
        self.now_ms.saturating_sub(earlier)
    }

    /// Number of ticks so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Per-frame period
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub const fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a stopwatch that is already running
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start (or resume) timing
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stop timing and fold the running span into the total
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Total elapsed time, including a running span
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map_or(self.elapsed, |start| self.elapsed + start.elapsed())
    }

    /// Whether the stopwatch is running
    pub const fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_advances_by_period() {
        let mut clock = FrameClock::default();
        let start = clock.now_ms();
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.now_ms(), 64);
        assert_eq!(clock.since(start), 64);
        assert_eq!(clock.frame_count(), 4);
        assert_eq!(clock.since(1_000), 0);
    }

    #[test]
    fn test_stopwatch_accumulates() {
        let mut watch = Stopwatch::new();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), Duration::ZERO);
        watch.start();
        assert!(watch.is_running());
        watch.stop();
        assert!(!watch.is_running());
    }
}
