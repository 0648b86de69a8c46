use tw_core::{EntityId, EntitySpec, Registry};

use crate::clock::{ClockTask, ManualTime, MonotonicTime, SimClock, TimeSource};
use crate::collision::CollisionTask;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::EventLog;
use crate::motion::MotionTask;
use crate::scheduler::Scheduler;
use crate::task::Task;

/// The top-level simulation context.
///
/// Owns the registry, clock, scheduler, event log, and time source. An
/// external driver calls [`Simulation::tick`] at a nominal fixed interval;
/// everything between two calls to `tick` is safe for a reader to inspect.
pub struct Simulation {
    registry: Registry,
    clock: SimClock,
    scheduler: Scheduler,
    events: EventLog,
    time: Box<dyn TimeSource>,
    config: SimConfig,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.ticks())
            .field("entities", &self.registry.len())
            .field("tasks", &self.scheduler.names())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation with an empty registry and no tasks.
    ///
    /// The time source is sampled once here to fix the clock's start instant.
    pub fn new(config: SimConfig, time: Box<dyn TimeSource>) -> SimResult<Self> {
        let registry = Registry::with_default_speed(config.default_speed);
        Self::with_registry(registry, config, time)
    }

    /// Create a simulation around an already populated registry.
    ///
    /// The registry's default speed must match `config.default_speed`, since
    /// later spawns take their fallback speed from the registry.
    pub fn with_registry(
        registry: Registry,
        config: SimConfig,
        mut time: Box<dyn TimeSource>,
    ) -> SimResult<Self> {
        config.validate()?;
        if registry.default_speed() != config.default_speed {
            return Err(SimError::InvalidConfig(format!(
                "registry default speed {} does not match configured default_speed {}",
                registry.default_speed(),
                config.default_speed
            )));
        }
        let start = time.now_ms();
        log::debug!("simulation starting at t={start:.3}ms with {config:?}");
        Ok(Self {
            registry,
            clock: SimClock::new(start),
            scheduler: Scheduler::new(),
            events: EventLog::new(config.max_events),
            time,
            config,
        })
    }

    /// Register the clock, motion, and collision tasks, in that order.
    pub fn with_standard_tasks(mut self) -> SimResult<Self> {
        self.add_task(ClockTask)?;
        self.add_task(MotionTask::new())?;
        self.add_task(CollisionTask::new())?;
        Ok(self)
    }

    /// Standard simulation driven by a deterministic clock that advances
    /// exactly `tick_interval_ms` per tick.
    pub fn headless(config: SimConfig) -> SimResult<Self> {
        let time = ManualTime::new(config.tick_interval_ms);
        Self::new(config, Box::new(time))?.with_standard_tasks()
    }

    /// Standard simulation driven by the wall clock.
    pub fn realtime(config: SimConfig) -> SimResult<Self> {
        Self::new(config, Box::new(MonotonicTime::new()))?.with_standard_tasks()
    }

    /// Register a task. Tasks are resumed in registration order.
    pub fn add_task<T: Task + 'static>(&mut self, task: T) -> SimResult<()> {
        self.scheduler.add(task)
    }

    /// Validate and add an entity.
    pub fn spawn(&mut self, spec: EntitySpec) -> SimResult<EntityId> {
        Ok(self.registry.spawn(spec)?)
    }

    /// Advance one tick using the time source.
    pub fn tick(&mut self) {
        let now = self.time.now_ms();
        self.tick_at(now);
    }

    /// Advance one tick as if the time source had returned `now`.
    pub fn tick_at(&mut self, now: f64) {
        let mut ctx = SimContext {
            registry: &mut self.registry,
            clock: &mut self.clock,
            events: &mut self.events,
            now,
        };
        let retired = self.scheduler.run_tick(&mut ctx);
        log::debug!(
            "tick {} done (delta={:.3}ms, {} tasks active, {} retired)",
            self.clock.ticks(),
            self.clock.delta(),
            self.scheduler.len(),
            retired.len()
        );
    }

    /// Advance `n` ticks using the time source.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// The live entities.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the live entities, for use between ticks.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The shared clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Everything tasks have reported.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The task scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Access an active task by downcasting to a concrete type.
    pub fn task<T: Task + 'static>(&self) -> Option<&T> {
        self.scheduler.task::<T>()
    }

    /// The configuration this simulation was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of ticks the clock has taken.
    pub fn current_tick(&self) -> u64 {
        self.clock.ticks()
    }

    /// Collision pairs reported during the most recent tick.
    ///
    /// Read from the collision task, so the result is complete even when the
    /// event log has dropped some of that tick's events. Empty when no
    /// collision task is registered.
    pub fn last_collisions(&self) -> Vec<(EntityId, EntityId)> {
        self.task::<CollisionTask>()
            .map(|c| c.last_pairs().to_vec())
            .unwrap_or_default()
    }
}
