//! Cooperative tick scheduler and simulation kernel for Tickwork.
//!
//! A [`Simulation`] owns a [`tw_core::Registry`], a [`SimClock`], and a
//! [`Scheduler`] of resumable [`Task`]s. Each call to [`Simulation::tick`]
//! samples the time source once and resumes every active task exactly once,
//! in registration order: the clock task updates the delta, the motion task
//! moves entities toward their targets, and the collision task reports every
//! overlapping pair.

/// Simulation clock, time sources, and the clock task.
pub mod clock;
/// Collision geometry, canonical pair enumeration, and the collision task.
pub mod collision;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to tasks each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Motion integrator and the motion task.
pub mod motion;
/// Runs tasks once per tick and retires finished ones.
pub mod scheduler;
/// Top-level simulation context and tick driver.
pub mod simulation;
/// The trait that all scheduled tasks implement.
pub mod task;

/// Re-exports of clock types.
pub use clock::{ClockTask, ManualTime, MonotonicTime, SimClock, TimeSource};
/// Re-export of [`collision::CollisionTask`].
pub use collision::CollisionTask;
/// Re-export of [`config::SimConfig`] and its event log default.
pub use config::{DEFAULT_MAX_EVENTS, SimConfig};
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`motion::MotionTask`].
pub use motion::MotionTask;
/// Re-export of [`scheduler::Scheduler`].
pub use scheduler::Scheduler;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of [`task::Task`], [`task::TaskStatus`], and [`task::FnTask`].
pub use task::{FnTask, Task, TaskStatus};
