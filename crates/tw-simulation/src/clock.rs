use std::time::Instant;

use crate::context::SimContext;
use crate::task::{Task, TaskStatus};

/// Tracks simulation time: elapsed milliseconds since start and the per-tick delta.
///
/// All times are offsets from the start instant given at construction. With a
/// monotonic source `delta` is never negative; a source that runs backward
/// produces a negative delta, which the motion integrator treats as no motion.
#[derive(Debug, Clone)]
pub struct SimClock {
    start_offset: f64,
    last_time: f64,
    this_time: f64,
    delta: f64,
    ticks: u64,
}

impl SimClock {
    /// Create a clock whose zero is the absolute time `start_offset`.
    pub fn new(start_offset: f64) -> Self {
        Self {
            start_offset,
            last_time: 0.0,
            this_time: 0.0,
            delta: 0.0,
            ticks: 0,
        }
    }

    /// Advance to absolute time `now`. Returns the new delta.
    pub fn tick(&mut self, now: f64) -> f64 {
        self.last_time = self.this_time;
        self.this_time = now - self.start_offset;
        self.delta = self.this_time - self.last_time;
        self.ticks += 1;
        self.delta
    }

    /// Time of the previous tick, relative to start.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Time of the current tick, relative to start.
    pub fn this_time(&self) -> f64 {
        self.this_time
    }

    /// Milliseconds between the previous and the current tick.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The absolute time treated as zero.
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }
}

// ---------------------------------------------------------------------------
// Time sources
// ---------------------------------------------------------------------------

/// Supplies the absolute time, in milliseconds, sampled once per tick.
pub trait TimeSource: std::fmt::Debug {
    /// Current time in milliseconds.
    fn now_ms(&mut self) -> f64;
}

/// Wall-clock time from [`Instant`], measured from when the source was created.
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicTime {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic time: each sample returns the current value, then advances it by `step`.
#[derive(Debug, Clone)]
pub struct ManualTime {
    now: f64,
    step: f64,
}

impl ManualTime {
    /// Start at zero, advancing `step` milliseconds per sample.
    pub fn new(step: f64) -> Self {
        Self { now: 0.0, step }
    }

    /// Jump to an absolute time.
    pub fn set(&mut self, now: f64) {
        self.now = now;
    }

    /// The value the next sample will return.
    pub fn peek(&self) -> f64 {
        self.now
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

// ---------------------------------------------------------------------------
// Clock task
// ---------------------------------------------------------------------------

/// Advances the shared clock to the time sampled for this tick.
///
/// Register it before any task that reads the delta.
#[derive(Debug, Default)]
pub struct ClockTask;

impl Task for ClockTask {
    fn name(&self) -> &str {
        "clock"
    }

    fn step(&mut self, ctx: &mut SimContext<'_>) -> TaskStatus {
        let delta = ctx.clock.tick(ctx.now);
        log::trace!("clock tick {} delta={delta:.3}ms", ctx.clock.ticks());
        TaskStatus::Continue
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(1000.0);
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.this_time(), 0.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn clock_delta_is_difference_of_ticks() {
        let mut clock = SimClock::new(1000.0);
        clock.tick(1010.0);
        clock.tick(1043.0);
        assert_eq!(clock.last_time(), 10.0);
        assert_eq!(clock.this_time(), 43.0);
        assert_eq!(clock.delta(), 33.0);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn clock_first_tick_measures_from_start() {
        let mut clock = SimClock::new(500.0);
        assert_eq!(clock.tick(533.0), 33.0);
    }

    #[test]
    fn clock_backward_time_gives_negative_delta() {
        let mut clock = SimClock::new(0.0);
        clock.tick(100.0);
        assert_eq!(clock.tick(90.0), -10.0);
    }

    #[test]
    fn manual_time_steps_per_sample() {
        let mut time = ManualTime::new(33.0);
        assert_eq!(time.now_ms(), 0.0);
        assert_eq!(time.now_ms(), 33.0);
        time.set(100.0);
        assert_eq!(time.peek(), 100.0);
        assert_eq!(time.now_ms(), 100.0);
        assert_eq!(time.now_ms(), 133.0);
    }

    #[test]
    fn monotonic_time_never_goes_back() {
        let mut time = MonotonicTime::new();
        let a = time.now_ms();
        let b = time.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
