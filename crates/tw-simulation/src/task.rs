use std::fmt;

use crate::context::SimContext;

/// What a task reports after being resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Suspended; resume again next tick.
    Continue,
    /// Finished; retire and never resume again.
    Done,
}

/// A cooperatively scheduled unit of simulation logic.
///
/// The scheduler calls [`Task::step`] exactly once per tick until the task
/// returns [`TaskStatus::Done`]. Anything a task needs to remember between
/// ticks lives in its own fields. There is no external cancellation: a task
/// that should stop early checks for that itself and returns `Done`.
pub trait Task: fmt::Debug {
    /// Human-readable name, unique within a scheduler.
    fn name(&self) -> &str;

    /// Run one step of the task.
    fn step(&mut self, ctx: &mut SimContext<'_>) -> TaskStatus;

    /// Support downcasting to concrete types for reading task state.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types for reading task state.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Adapts a closure into a [`Task`].
///
/// ```
/// use tw_simulation::{FnTask, SimContext, TaskStatus};
///
/// let mut remaining = 3;
/// let countdown = FnTask::new("countdown", move |_ctx: &mut SimContext<'_>| {
///     remaining -= 1;
///     if remaining == 0 { TaskStatus::Done } else { TaskStatus::Continue }
/// });
/// # let _ = countdown;
/// ```
pub struct FnTask<F> {
    name: String,
    f: F,
}

impl<F> FnTask<F>
where
    F: FnMut(&mut SimContext<'_>) -> TaskStatus,
{
    /// Wrap `f` as a task called `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnTask<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTask").field("name", &self.name).finish()
    }
}

impl<F> Task for FnTask<F>
where
    F: FnMut(&mut SimContext<'_>) -> TaskStatus + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, ctx: &mut SimContext<'_>) -> TaskStatus {
        (self.f)(ctx)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
