use tw_core::Registry;

use crate::clock::SimClock;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each task during a tick.
pub struct SimContext<'a> {
    /// The live entities.
    pub registry: &'a mut Registry,
    /// Shared simulation time; advanced by the clock task.
    pub clock: &'a mut SimClock,
    /// Sink for everything tasks report.
    pub events: &'a mut EventLog,
    /// Absolute time sampled once for this tick.
    pub now: f64,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.ticks(), kind, description));
    }

    /// Number of ticks the clock has taken.
    pub fn tick(&self) -> u64 {
        self.clock.ticks()
    }

    /// Milliseconds elapsed between the previous and current tick.
    pub fn delta(&self) -> f64 {
        self.clock.delta()
    }
}
